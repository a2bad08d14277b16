pub fn handle_command(input: &str) -> Result<(), String> {
    match input.to_lowercase().as_str() {
        "help" => {
            println!("\n🔥 Calorie Commands:");
            println!("  calc <age> <gender> <weight-kg> <height-cm> <activity>");
            println!("      - Calculate BMR, TDEE and macros");
            println!("      - Activity: sedentary, lightly_active, moderately_active, very_active, super_active");
            println!("      - Example: calc 30 male 70 175 moderate");
            println!("  results       - Show the last calculation again");
            println!();

            println!("🍳 Meal Commands:");
            println!("  meals <ingredients>  - Suggest 3 meals from what you have");
            println!("  recipe <meal name>   - Full recipe with ingredients and steps");
            println!("  video <meal name>    - Find a tutorial video on YouTube");
            println!("  Example: meals eggs, tomato, rice");
            println!();

            println!("💪 Exercise Commands:");
            println!("  goal <name>   - Pick a goal: weight_loss, muscle_gain, general_fitness, endurance");
            println!("  exercises     - Suggest exercises for your TDEE and goal (run calc first)");
            println!();

            println!("⚙️ System Commands:");
            println!("  help  - Show this help menu");
            println!("  exit  - Exit the program");
            Ok(())
        }
        "exit" | "quit" => {
            println!("👋 Goodbye!");
            std::process::exit(0);
        }
        _ => Err("Unknown system command. Type 'help' for available commands.".to_string()),
    }
}
