use serde::{Deserialize, Serialize};

use crate::calculator::levels::{ActivityLevel, ExerciseGoal, Gender};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSuggestion {
    pub meal_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_calories: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_grams: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs_grams: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fats_grams: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRecipe {
    pub meal_name: String,
    pub ingredients: Vec<Ingredient>,
    pub preparation_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeVideo {
    pub youtube_video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSuggestion {
    pub exercise_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_calories_burned: Option<String>,
    /// Normalized to `None` unless the model returned a non-empty URL.
    pub animation_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseParams {
    pub tdee: f64,
    pub gender: Gender,
    pub age: u32,
    pub current_activity_level: ActivityLevel,
    pub exercise_goal: ExerciseGoal,
}
