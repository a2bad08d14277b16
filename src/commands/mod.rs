use colored::Colorize;

use crate::calculator::levels::{ActivityLevel, ExerciseGoal};
use crate::calculator::metrics::{BiometricInput, CalculationResult};
use crate::suggestions::gateway::SuggestionGateway;
use crate::suggestions::types::{ExerciseParams, ExerciseSuggestion};

mod calc_cmd;
mod suggest_cmd;
mod system;

pub struct CommandHandler {
    gateway: SuggestionGateway,
    biometrics: Option<BiometricInput>,
    activity_level: Option<ActivityLevel>,
    results: Option<CalculationResult>,
    exercise_goal: Option<ExerciseGoal>,
    exercise_suggestions: Vec<ExerciseSuggestion>,
}

impl CommandHandler {
    pub fn new(gateway: SuggestionGateway) -> Self {
        Self {
            gateway,
            biometrics: None,
            activity_level: None,
            results: None,
            exercise_goal: None,
            exercise_suggestions: Vec::new(),
        }
    }

    pub async fn handle_command(&mut self, input: &str) -> Result<(), String> {
        if input.is_empty() {
            return Ok(());
        }

        let input = input.trim();

        // Handle single-word commands first
        match input.to_lowercase().as_str() {
            "help" | "exit" | "quit" => return system::handle_command(input),
            "results" => return self.show_results(),
            "exercises" => return self.handle_exercises().await,
            _ => {}
        }

        if input.starts_with("calc ") || input.eq_ignore_ascii_case("calc") {
            return self.handle_calc(input).await;
        }

        if input.starts_with("meals ") || input.eq_ignore_ascii_case("meals") {
            return suggest_cmd::handle_meals(input, &self.gateway).await;
        }

        if input.starts_with("recipe ") || input.eq_ignore_ascii_case("recipe") {
            return suggest_cmd::handle_recipe(input, &self.gateway).await;
        }

        if input.starts_with("video ") || input.eq_ignore_ascii_case("video") {
            return suggest_cmd::handle_video(input, &self.gateway).await;
        }

        if input.starts_with("goal ") || input.eq_ignore_ascii_case("goal") {
            return self.handle_goal(input);
        }

        Err("Unknown command. Type 'help' for available commands.".to_string())
    }

    async fn handle_calc(&mut self, input: &str) -> Result<(), String> {
        let (biometrics, level) = calc_cmd::parse_input(input)?;
        let results = CalculationResult::compute(&biometrics, level);

        // A fresh calculation invalidates exercise suggestions made
        // against the previous TDEE.
        if !self.exercise_suggestions.is_empty() {
            println!(
                "(cleared {} exercise suggestions tied to the previous result)",
                self.exercise_suggestions.len()
            );
        }
        self.exercise_suggestions.clear();
        self.exercise_goal = None;

        calc_cmd::print_results(&results, level);

        self.biometrics = Some(biometrics);
        self.activity_level = Some(level);
        self.results = Some(results);
        Ok(())
    }

    fn show_results(&self) -> Result<(), String> {
        match (&self.results, self.activity_level) {
            (Some(results), Some(level)) => {
                calc_cmd::print_results(results, level);
                if let Some(goal) = self.exercise_goal {
                    println!("  Exercise goal: {}", goal.label().cyan());
                }
                Ok(())
            }
            _ => Err("No calculation yet. Run 'calc <age> <gender> <weight-kg> <height-cm> <activity>' first.".to_string()),
        }
    }

    fn handle_goal(&mut self, input: &str) -> Result<(), String> {
        let goal_text = input.trim_start_matches("goal").trim();
        if goal_text.is_empty() {
            println!("Please specify a goal: weight_loss, muscle_gain, general_fitness or endurance.");
            return Ok(());
        }

        let goal: ExerciseGoal = goal_text.parse()?;
        self.exercise_goal = Some(goal);
        println!("🎯 Exercise goal set to {}", goal.label().cyan());
        Ok(())
    }

    async fn handle_exercises(&mut self) -> Result<(), String> {
        let results = self
            .results
            .as_ref()
            .ok_or("No calculation yet. Run 'calc ...' before asking for exercises.")?;
        let biometrics = self
            .biometrics
            .as_ref()
            .ok_or("No calculation yet. Run 'calc ...' before asking for exercises.")?;
        let level = self
            .activity_level
            .ok_or("No calculation yet. Run 'calc ...' before asking for exercises.")?;
        let goal = self
            .exercise_goal
            .ok_or("No goal selected. Use 'goal <name>' first.")?;

        let params = ExerciseParams {
            tdee: results.tdee,
            gender: biometrics.gender,
            age: biometrics.age,
            current_activity_level: level,
            exercise_goal: goal,
        };

        let exercises = suggest_cmd::fetch_exercises(&params, &self.gateway).await?;
        self.exercise_suggestions = exercises;
        Ok(())
    }
}
