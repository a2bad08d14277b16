use colored::Colorize;

use crate::suggestions::gateway::SuggestionGateway;
use crate::suggestions::types::{ExerciseParams, ExerciseSuggestion};

pub async fn handle_meals(input: &str, gateway: &SuggestionGateway) -> Result<(), String> {
    let ingredients = input.trim_start_matches("meals").trim();
    if ingredients.is_empty() {
        return Ok(println!(
            "Please list the ingredients you have. Example: meals eggs, tomato, rice"
        ));
    }

    println!("🍳 Asking for meal ideas...");
    let meals = gateway
        .suggest_meals(ingredients)
        .await
        .map_err(|e| e.to_string())?;

    if meals.is_empty() {
        println!("No meal suggestions found for those ingredients.");
        return Ok(());
    }

    for meal in &meals {
        println!("\n🍽️ {}", meal.meal_name.cyan().bold());
        println!("  {}", meal.description);
        if let Some(calories) = &meal.estimated_calories {
            println!("  Calories: {}", calories);
        }
        for (label, value) in [
            ("Protein", &meal.protein_grams),
            ("Carbs", &meal.carbs_grams),
            ("Fat", &meal.fats_grams),
        ] {
            if let Some(value) = value {
                println!("  {}: {}", label, value);
            }
        }
    }
    println!();
    Ok(())
}

pub async fn handle_recipe(input: &str, gateway: &SuggestionGateway) -> Result<(), String> {
    let meal_name = input.trim_start_matches("recipe").trim();
    if meal_name.is_empty() {
        return Ok(println!(
            "Please specify a meal name. Example: recipe lentil soup"
        ));
    }

    println!("👨‍🍳 Fetching the recipe...");
    let recipe = gateway
        .detailed_recipe(meal_name)
        .await
        .map_err(|e| e.to_string())?;

    println!("\n🍽️ {}", recipe.meal_name.cyan().bold());
    println!("\n📝 Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  • {} — {}", ingredient.name, ingredient.quantity);
    }
    println!("\n📋 Preparation:");
    for (i, step) in recipe.preparation_steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
    Ok(())
}

pub async fn handle_video(input: &str, gateway: &SuggestionGateway) -> Result<(), String> {
    let meal_name = input.trim_start_matches("video").trim();
    if meal_name.is_empty() {
        return Ok(println!(
            "Please specify a meal name. Example: video lentil soup"
        ));
    }

    println!("🔍 Searching for a tutorial video...");
    let video = gateway
        .find_recipe_video(meal_name)
        .await
        .map_err(|e| e.to_string())?;

    match video.youtube_video_id {
        Some(id) => println!(
            "▶️ Found one: {}",
            format!("https://www.youtube.com/watch?v={}", id).cyan()
        ),
        None => println!("No tutorial video found for {}.", meal_name),
    }
    Ok(())
}

pub async fn fetch_exercises(
    params: &ExerciseParams,
    gateway: &SuggestionGateway,
) -> Result<Vec<ExerciseSuggestion>, String> {
    println!(
        "🏋️ Asking for {} exercises around {} kcal/day...",
        params.exercise_goal.label(),
        params.tdee.round()
    );
    let exercises = gateway
        .suggest_exercises(params)
        .await
        .map_err(|e| e.to_string())?;

    if exercises.is_empty() {
        println!("No exercise suggestions found.");
        return Ok(exercises);
    }

    for exercise in &exercises {
        println!("\n💪 {}", exercise.exercise_name.cyan().bold());
        println!("  {}", exercise.description);
        if let Some(duration) = &exercise.duration {
            println!("  Duration: {}", duration);
        }
        if let Some(intensity) = &exercise.intensity {
            println!("  Intensity: {}", intensity);
        }
        if let Some(burned) = &exercise.estimated_calories_burned {
            println!("  Burn estimate: {}", burned);
        }
        if let Some(url) = &exercise.animation_url {
            println!("  Demo: {}", url);
        }
    }
    println!();
    Ok(exercises)
}
