use colored::Colorize;
use validator::Validate;

use crate::calculator::levels::ActivityLevel;
use crate::calculator::metrics::{BiometricInput, CalculationResult};

/// Parses `calc <age> <gender> <weight-kg> <height-cm> <activity>`.
pub fn parse_input(input: &str) -> Result<(BiometricInput, ActivityLevel), String> {
    let args: Vec<&str> = input
        .trim_start_matches("calc")
        .split_whitespace()
        .collect();

    if args.len() != 5 {
        return Err(
            "Usage: calc <age> <gender> <weight-kg> <height-cm> <activity>\nExample: calc 30 male 70 175 moderate".to_string(),
        );
    }

    let age: u32 = args[0]
        .parse()
        .map_err(|_| format!("'{}' is not a valid age.", args[0]))?;
    let gender = args[1].parse()?;
    let weight_kg: f64 = args[2]
        .parse()
        .map_err(|_| format!("'{}' is not a valid weight in kg.", args[2]))?;
    let height_cm: f64 = args[3]
        .parse()
        .map_err(|_| format!("'{}' is not a valid height in cm.", args[3]))?;
    let level: ActivityLevel = args[4].parse()?;

    let biometrics = BiometricInput {
        age,
        gender,
        weight_kg,
        height_cm,
    };
    biometrics
        .validate()
        .map_err(|e| format!("Invalid input: {}", e))?;

    Ok((biometrics, level))
}

pub fn print_results(results: &CalculationResult, level: ActivityLevel) {
    println!("\n🔥 Daily calorie needs");
    println!("  Activity level: {}", level.label().cyan());
    println!("  BMR:  {} kcal/day", format!("{:.0}", results.bmr).cyan());
    println!("  TDEE: {} kcal/day", format!("{:.0}", results.tdee).cyan());

    println!("\n🥗 Suggested macro split (40% carbs / 30% protein / 30% fat):");
    println!("  Protein: {} g", results.protein_grams.to_string().cyan());
    println!("  Carbs:   {} g", results.carbs_grams.to_string().cyan());
    println!("  Fat:     {} g", results.fats_grams.to_string().cyan());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::levels::Gender;

    #[test]
    fn test_parse_valid_command() {
        let (biometrics, level) = parse_input("calc 30 male 70 175 moderate").unwrap();
        assert_eq!(biometrics.age, 30);
        assert_eq!(biometrics.gender, Gender::Male);
        assert_eq!(level, ActivityLevel::ModeratelyActive);
    }

    #[test]
    fn test_parse_rejects_out_of_range_age() {
        assert!(parse_input("calc 121 male 70 175 moderate").is_err());
    }

    #[test]
    fn test_parse_rejects_missing_args() {
        assert!(parse_input("calc 30 male 70").is_err());
    }
}
