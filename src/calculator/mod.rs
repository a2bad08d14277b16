pub mod levels;
pub mod metrics;

// Re-export common types
pub use levels::{ActivityLevel, ExerciseGoal, Gender};
pub use metrics::{BiometricInput, CalculationResult, MacroSplit};
