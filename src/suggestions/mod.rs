pub mod error;
pub mod gateway;
pub mod parse;
pub mod types;

// Re-export common types
pub use error::SuggestionError;
pub use gateway::SuggestionGateway;
pub use types::{
    DetailedRecipe, ExerciseParams, ExerciseSuggestion, Ingredient, MealSuggestion, RecipeVideo,
};
