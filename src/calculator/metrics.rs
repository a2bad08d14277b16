use serde::{Deserialize, Serialize};
use validator::Validate;

use super::levels::{ActivityLevel, Gender};

/// Biometric data for a single calculation. Callers validate before
/// computing; the formulas themselves run on whatever they are given.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BiometricInput {
    #[validate(range(min = 1, max = 120))]
    pub age: u32,
    pub gender: Gender,
    #[validate(range(min = 0.1, max = 500.0))]
    pub weight_kg: f64,
    #[validate(range(min = 0.1, max = 300.0))]
    pub height_cm: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroSplit {
    pub protein_grams: u32,
    pub carbs_grams: u32,
    pub fats_grams: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub bmr: f64,
    pub tdee: f64,
    pub protein_grams: u32,
    pub carbs_grams: u32,
    pub fats_grams: u32,
}

impl CalculationResult {
    pub fn compute(input: &BiometricInput, level: ActivityLevel) -> Self {
        let bmr = calculate_bmr(input);
        let tdee = calculate_tdee(bmr, level.multiplier());
        let macros = calculate_macronutrients(tdee);
        Self {
            bmr,
            tdee,
            protein_grams: macros.protein_grams,
            carbs_grams: macros.carbs_grams,
            fats_grams: macros.fats_grams,
        }
    }
}

/// Basal Metabolic Rate via the Mifflin-St Jeor equation.
pub fn calculate_bmr(input: &BiometricInput) -> f64 {
    let base = 10.0 * input.weight_kg + 6.25 * input.height_cm - 5.0 * f64::from(input.age);
    match input.gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Total Daily Energy Expenditure: BMR scaled by the activity multiplier.
pub fn calculate_tdee(bmr: f64, activity_multiplier: f64) -> f64 {
    bmr * activity_multiplier
}

/// Macronutrient split: 40% of TDEE calories from carbs, 30% protein,
/// 30% fat. Protein and carbs at 4 kcal/g, fat at 9 kcal/g, each
/// rounded independently.
pub fn calculate_macronutrients(tdee: f64) -> MacroSplit {
    let calories_from_carbs = tdee * 0.40;
    let calories_from_protein = tdee * 0.30;
    let calories_from_fats = tdee * 0.30;

    MacroSplit {
        protein_grams: (calories_from_protein / 4.0).round() as u32,
        carbs_grams: (calories_from_carbs / 4.0).round() as u32,
        fats_grams: (calories_from_fats / 9.0).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(age: u32, gender: Gender, weight_kg: f64, height_cm: f64) -> BiometricInput {
        BiometricInput {
            age,
            gender,
            weight_kg,
            height_cm,
        }
    }

    #[test]
    fn test_bmr_worked_example() {
        // 10*70 + 6.25*175 - 5*30 + 5
        let bmr = calculate_bmr(&input(30, Gender::Male, 70.0, 175.0));
        assert!((bmr - 1648.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bmr_gender_offset() {
        // Same age/weight/height: the male formula ends +5, the female
        // formula ends -161, so the difference is always 166.
        let male = calculate_bmr(&input(42, Gender::Male, 83.5, 180.2));
        let female = calculate_bmr(&input(42, Gender::Female, 83.5, 180.2));
        assert!((male - female - 166.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_tdee_linear_in_multiplier() {
        let bmr = 1648.75;
        let once = calculate_tdee(bmr, 1.375);
        let twice = calculate_tdee(bmr, 2.0 * 1.375);
        assert!((twice - 2.0 * once).abs() < 1e-9);
    }

    #[test]
    fn test_macros_for_2000_kcal() {
        let macros = calculate_macronutrients(2000.0);
        assert_eq!(macros.protein_grams, 150); // round(600 / 4)
        assert_eq!(macros.carbs_grams, 200); // round(800 / 4)
        assert_eq!(macros.fats_grams, 67); // round(600 / 9)
    }

    #[test]
    fn test_macros_round_independently() {
        // 40/30/30 split is not renormalized, so calories recomputed
        // from grams may drift slightly from the input TDEE.
        let macros = calculate_macronutrients(1835.0);
        let recomposed =
            (macros.protein_grams * 4 + macros.carbs_grams * 4 + macros.fats_grams * 9) as f64;
        assert!((recomposed - 1835.0).abs() < 9.0);
    }

    #[test]
    fn test_compute_pipeline() {
        let result = CalculationResult::compute(
            &input(30, Gender::Male, 70.0, 175.0),
            ActivityLevel::Sedentary,
        );
        assert!((result.bmr - 1648.75).abs() < f64::EPSILON);
        assert!((result.tdee - 1648.75 * 1.2).abs() < 1e-9);
        assert_eq!(
            result.protein_grams,
            ((1648.75_f64 * 1.2 * 0.30) / 4.0).round() as u32
        );
    }

    #[test]
    fn test_boundary_validation() {
        assert!(input(30, Gender::Male, 70.0, 175.0).validate().is_ok());
        assert!(input(0, Gender::Male, 70.0, 175.0).validate().is_err());
        assert!(input(121, Gender::Female, 70.0, 175.0).validate().is_err());
        assert!(input(30, Gender::Male, 501.0, 175.0).validate().is_err());
        assert!(input(30, Gender::Male, 70.0, 301.0).validate().is_err());
    }
}
