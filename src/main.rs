use clap::Parser;
use colored::Colorize;
use dotenv::dotenv;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use rust_calorie_coach::api;
use rust_calorie_coach::commands::CommandHandler;
use rust_calorie_coach::suggestions::gateway::SuggestionGateway;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Gemini API key; falls back to GEMINI_API_KEY
    #[arg(short, long)]
    api_key: Option<String>,

    /// Run the HTTP API server instead of the interactive CLI
    #[arg(long)]
    api: bool,

    #[arg(long, default_value = "3000")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Initialize colored output
    colored::control::set_override(true);

    // Load environment variables
    dotenv().ok();
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    if args.api {
        run_api_server(args).await
    } else {
        run_cli_mode(&args).await
    }
}

async fn build_gateway(args: &Args) -> SuggestionGateway {
    match &args.api_key {
        Some(key) => SuggestionGateway::with_api_key(key.clone()).await,
        None => SuggestionGateway::from_env().await,
    }
}

async fn run_cli_mode(args: &Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let gateway = build_gateway(args).await;
    if !gateway.is_available() {
        println!(
            "{}",
            "⚠️ No Gemini API key configured. The calculator works, but meal and exercise suggestions are disabled."
                .yellow()
        );
    }

    let mut command_handler = CommandHandler::new(gateway);

    // Show initial help menu
    command_handler.handle_command("help").await?;

    // Initialize rustyline editor
    let mut rl = Editor::<(), DefaultHistory>::new()?;

    // Main input loop
    loop {
        match rl.readline("👤 ") {
            Ok(line) => {
                let input = line.trim();
                rl.add_history_entry(input);

                if let Err(e) = command_handler.handle_command(input).await {
                    println!("{}", e.red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    Ok(())
}

async fn run_api_server(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr: SocketAddr = format!("0.0.0.0:{}", args.port)
        .parse()
        .map_err(|e| format!("Failed to parse address: {}", e))?;

    println!("Starting API server on {}", addr);

    let gateway = build_gateway(&args).await;
    if !gateway.is_available() && env::var("GEMINI_API_KEY").is_err() {
        println!("⚠️ GEMINI_API_KEY not set; suggestion endpoints will answer 503.");
    }

    let app = api::create_api(gateway);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    println!("Server successfully bound to {}", addr);
    println!("Ready to accept connections!");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
