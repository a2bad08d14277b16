use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("Unknown gender '{}'. Use male or female.", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
    SuperActive,
}

// Fixed activity tiers: multiplier and display label per tier.
// Adding a tier means adding one row here.
pub const ACTIVITY_LEVELS: &[(ActivityLevel, f64, &str)] = &[
    (ActivityLevel::Sedentary, 1.2, "Sedentary (little or no exercise)"),
    (
        ActivityLevel::LightlyActive,
        1.375,
        "Lightly active (light exercise/sports 1-3 days/week)",
    ),
    (
        ActivityLevel::ModeratelyActive,
        1.55,
        "Moderately active (moderate exercise/sports 3-5 days/week)",
    ),
    (
        ActivityLevel::VeryActive,
        1.725,
        "Very active (hard exercise/sports 6-7 days/week)",
    ),
    (
        ActivityLevel::SuperActive,
        1.9,
        "Super active (very hard exercise and a physical job or double training)",
    ),
];

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::SuperActive => "super_active",
        }
    }

    pub fn multiplier(&self) -> f64 {
        ACTIVITY_LEVELS
            .iter()
            .find(|(level, _, _)| level == self)
            .map(|(_, multiplier, _)| *multiplier)
            .unwrap_or(1.2)
    }

    /// Display label from the tier table; falls back to the raw tier
    /// name if the table has no entry.
    pub fn label(&self) -> &'static str {
        ACTIVITY_LEVELS
            .iter()
            .find(|(level, _, _)| level == self)
            .map(|(_, _, label)| *label)
            .unwrap_or_else(|| self.as_str())
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" | "very" => Ok(ActivityLevel::VeryActive),
            "super_active" | "super" => Ok(ActivityLevel::SuperActive),
            other => Err(format!(
                "Unknown activity level '{}'. Available levels: sedentary, lightly_active, moderately_active, very_active, super_active",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExerciseGoal {
    WeightLoss,
    MuscleGain,
    GeneralFitness,
    Endurance,
}

impl ExerciseGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseGoal::WeightLoss => "weightLoss",
            ExerciseGoal::MuscleGain => "muscleGain",
            ExerciseGoal::GeneralFitness => "generalFitness",
            ExerciseGoal::Endurance => "endurance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExerciseGoal::WeightLoss => "weight loss",
            ExerciseGoal::MuscleGain => "muscle gain",
            ExerciseGoal::GeneralFitness => "general fitness",
            ExerciseGoal::Endurance => "endurance",
        }
    }
}

impl fmt::Display for ExerciseGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExerciseGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_'], "").as_str() {
            "weightloss" => Ok(ExerciseGoal::WeightLoss),
            "musclegain" => Ok(ExerciseGoal::MuscleGain),
            "generalfitness" | "fitness" => Ok(ExerciseGoal::GeneralFitness),
            "endurance" => Ok(ExerciseGoal::Endurance),
            other => Err(format!(
                "Unknown exercise goal '{}'. Available goals: weight_loss, muscle_gain, general_fitness, endurance",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_table() {
        assert_eq!(ActivityLevel::Sedentary.multiplier(), 1.2);
        assert_eq!(ActivityLevel::LightlyActive.multiplier(), 1.375);
        assert_eq!(ActivityLevel::ModeratelyActive.multiplier(), 1.55);
        assert_eq!(ActivityLevel::VeryActive.multiplier(), 1.725);
        assert_eq!(ActivityLevel::SuperActive.multiplier(), 1.9);
    }

    #[test]
    fn test_table_covers_all_tiers() {
        assert_eq!(ACTIVITY_LEVELS.len(), 5);
        for (level, multiplier, label) in ACTIVITY_LEVELS {
            assert!(*multiplier >= 1.2 && *multiplier <= 1.9);
            assert_eq!(level.label(), *label);
        }
    }

    #[test]
    fn test_goal_labels() {
        assert_eq!(ExerciseGoal::WeightLoss.label(), "weight loss");
        assert_eq!(ExerciseGoal::Endurance.label(), "endurance");
    }

    #[test]
    fn test_parse_level_aliases() {
        assert_eq!(
            "moderately_active".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert_eq!(
            "moderate".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert!("extreme".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_parse_goal() {
        assert_eq!(
            "weight_loss".parse::<ExerciseGoal>().unwrap(),
            ExerciseGoal::WeightLoss
        );
        assert_eq!(
            "muscle-gain".parse::<ExerciseGoal>().unwrap(),
            ExerciseGoal::MuscleGain
        );
        assert!("bulking".parse::<ExerciseGoal>().is_err());
    }
}
