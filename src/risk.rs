//! Deterministic diabetes-risk rule table. The weights are the product's
//! stated rules, not a statistical fit; change them only with product
//! sign-off.

use crate::error::ValidationError;
use crate::models::{
    BmiCategory, BmiResult, ExerciseFrequency, FastfoodFrequency, Gender, RiskAssessment,
    RiskLevel, StudentInput, SubRiskLevel,
};

/// The original scoring code combined the sub-risk point terms through an
/// unparenthesized ternary chain, so the diet and waist terms only take
/// effect on specific branches. `true` reproduces that shipped behavior;
/// `false` sums the terms unconditionally. Keep `true` until product
/// clarifies intent.
pub const LIFESTYLE_BUG_COMPAT: bool = true;

pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Rejects inputs outside the ranges the checkup form accepts. Enum fields
/// cannot hold invalid values by construction, so only the numeric fields
/// need checking.
pub fn validate(input: &StudentInput) -> Result<(), ValidationError> {
    if !(6..=19).contains(&input.age) {
        return Err(ValidationError::AgeOutOfRange(input.age));
    }
    if !(100.0..=200.0).contains(&input.height_cm) {
        return Err(ValidationError::HeightOutOfRange(input.height_cm));
    }
    if !(20.0..=150.0).contains(&input.weight_kg) {
        return Err(ValidationError::WeightOutOfRange(input.weight_kg));
    }
    if !(40.0..=150.0).contains(&input.waist_cm) {
        return Err(ValidationError::WaistOutOfRange(input.waist_cm));
    }
    Ok(())
}

/// Scores one student. Total over validated input: once `validate` passes,
/// every path below returns a result.
pub fn assess_risk(input: &StudentInput) -> Result<RiskAssessment, ValidationError> {
    validate(input)?;

    let bmi = calculate_bmi(input.weight_kg, input.height_cm);
    let raw = base_score(bmi)
        + waist_points(input.gender, input.waist_cm)
        + exercise_adjustment(input.exercise)
        + fastfood_adjustment(input.fastfood);
    let score = raw.clamp(0, 100);
    let level = RiskLevel::from_score(score);

    Ok(RiskAssessment {
        score,
        level,
        message: level.message(),
        bmi: BmiResult {
            value: bmi,
            category: BmiCategory::from_bmi(bmi),
        },
        lifestyle_risk: lifestyle_risk(input.exercise, input.fastfood),
        physical_risk: physical_risk(bmi, input.gender, input.waist_cm),
    })
}

/// Base score by BMI bucket. Five buckets: the obese display category splits
/// at 30 for scoring purposes.
fn base_score(bmi: f64) -> i32 {
    if bmi < 18.5 {
        10
    } else if bmi < 23.0 {
        20
    } else if bmi < 25.0 {
        40
    } else if bmi < 30.0 {
        60
    } else {
        80
    }
}

/// Waist add-on with gender-specific thresholds (abdominal obesity cutoffs:
/// 90 cm male, 85 cm female).
fn waist_points(gender: Gender, waist_cm: f64) -> i32 {
    match gender {
        Gender::Male => {
            if waist_cm > 90.0 {
                20
            } else if waist_cm > 85.0 {
                10
            } else {
                0
            }
        }
        Gender::Female => {
            if waist_cm > 85.0 {
                20
            } else if waist_cm > 80.0 {
                10
            } else {
                0
            }
        }
    }
}

fn exercise_adjustment(exercise: ExerciseFrequency) -> i32 {
    match exercise {
        ExerciseFrequency::Often => -15,
        ExerciseFrequency::Sometimes => -5,
        ExerciseFrequency::Rarely => 10,
    }
}

fn fastfood_adjustment(fastfood: FastfoodFrequency) -> i32 {
    match fastfood {
        FastfoodFrequency::Daily => 20,
        FastfoodFrequency::Often => 10,
        FastfoodFrequency::Sometimes => 5,
        FastfoodFrequency::Rarely => -5,
    }
}

pub fn lifestyle_risk(exercise: ExerciseFrequency, fastfood: FastfoodFrequency) -> SubRiskLevel {
    bucket(lifestyle_points(LIFESTYLE_BUG_COMPAT, exercise, fastfood))
}

pub fn physical_risk(bmi: f64, gender: Gender, waist_cm: f64) -> SubRiskLevel {
    bucket(physical_points(LIFESTYLE_BUG_COMPAT, bmi, gender, waist_cm))
}

fn lifestyle_points(
    compat: bool,
    exercise: ExerciseFrequency,
    fastfood: FastfoodFrequency,
) -> i32 {
    if compat {
        // Ternary precedence in the shipped code attached the diet chain to
        // the innermost exercise branch, and `+` bound tighter than the
        // equality test there: `0 + fastFood === 'daily'` concatenates into
        // a string that never equals 'daily'. Diet only counts when exercise
        // is "often", and the daily case falls through to zero.
        match exercise {
            ExerciseFrequency::Rarely => 30,
            ExerciseFrequency::Sometimes => 15,
            ExerciseFrequency::Often => match fastfood {
                FastfoodFrequency::Daily => 0,
                FastfoodFrequency::Often => 20,
                FastfoodFrequency::Sometimes => 10,
                FastfoodFrequency::Rarely => 0,
            },
        }
    } else {
        let exercise_points = match exercise {
            ExerciseFrequency::Rarely => 30,
            ExerciseFrequency::Sometimes => 15,
            ExerciseFrequency::Often => 0,
        };
        let diet = match fastfood {
            FastfoodFrequency::Daily => 30,
            FastfoodFrequency::Often => 20,
            FastfoodFrequency::Sometimes => 10,
            FastfoodFrequency::Rarely => 0,
        };
        exercise_points + diet
    }
}

fn physical_points(compat: bool, bmi: f64, gender: Gender, waist_cm: f64) -> i32 {
    let bmi_points = if bmi >= 25.0 {
        30
    } else if bmi >= 23.0 {
        15
    } else {
        0
    };
    let waist_exceeded = (gender == Gender::Male && waist_cm > 90.0)
        || (gender == Gender::Female && waist_cm > 85.0);
    if compat {
        // The shipped `points + flag || flag ? 30 : 0` chain collapses to a
        // single 30-point outcome whenever either term is non-zero.
        if bmi_points > 0 || waist_exceeded {
            30
        } else {
            0
        }
    } else {
        bmi_points + if waist_exceeded { 30 } else { 0 }
    }
}

/// Sub-risk bucketing. Thresholds are on the 0-60 sub-risk point scale and
/// are deliberately lower than the top-level risk-level cuts.
fn bucket(points: i32) -> SubRiskLevel {
    if points >= 40 {
        SubRiskLevel::High
    } else if points >= 20 {
        SubRiskLevel::Moderate
    } else {
        SubRiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(
        gender: Gender,
        height_cm: f64,
        weight_kg: f64,
        waist_cm: f64,
        exercise: ExerciseFrequency,
        fastfood: FastfoodFrequency,
    ) -> StudentInput {
        StudentInput {
            age: 16,
            gender,
            height_cm,
            weight_kg,
            waist_cm,
            exercise,
            fastfood,
        }
    }

    #[test]
    fn bmi_category_boundaries() {
        assert_eq!(BmiCategory::from_bmi(18.4), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(18.5), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(22.9), BmiCategory::Normal);
        assert_eq!(BmiCategory::from_bmi(23.0), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(24.9), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(25.0), BmiCategory::Obese);
    }

    #[test]
    fn high_risk_student_clamps_to_100() {
        // BMI 85 / 1.75^2 = 27.76: obese under 30, base 60; waist over the
        // male 90 cm cutoff adds 20; rarely exercising adds 10; daily fast
        // food adds 20. Raw 110 clamps to 100.
        let input = student(
            Gender::Male,
            175.0,
            85.0,
            95.0,
            ExerciseFrequency::Rarely,
            FastfoodFrequency::Daily,
        );
        let assessment = assess_risk(&input).unwrap();
        assert_eq!(assessment.score, 100);
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.bmi.category, BmiCategory::Obese);
        assert!((assessment.bmi.value - 27.755).abs() < 0.01);
    }

    #[test]
    fn low_risk_student_clamps_to_zero() {
        // BMI 19.53 gives base 20; waist under every female cutoff adds 0;
        // often exercising subtracts 15; rare fast food subtracts 5. Raw 0.
        let input = student(
            Gender::Female,
            160.0,
            50.0,
            65.0,
            ExerciseFrequency::Often,
            FastfoodFrequency::Rarely,
        );
        let assessment = assess_risk(&input).unwrap();
        assert_eq!(assessment.score, 0);
        assert_eq!(assessment.level, RiskLevel::Low);
        assert_eq!(assessment.bmi.category, BmiCategory::Normal);
    }

    #[test]
    fn score_never_goes_negative() {
        // Underweight, no waist add-on, both adjustments negative: raw -10.
        let input = student(
            Gender::Female,
            170.0,
            45.0,
            60.0,
            ExerciseFrequency::Often,
            FastfoodFrequency::Rarely,
        );
        let assessment = assess_risk(&input).unwrap();
        assert_eq!(assessment.score, 0);
    }

    #[test]
    fn base_score_increases_with_bmi_bucket() {
        let buckets = [17.0, 20.0, 24.0, 27.0, 32.0];
        for pair in buckets.windows(2) {
            assert!(base_score(pair[0]) < base_score(pair[1]));
        }
    }

    #[test]
    fn exercise_swing_is_exactly_25_points() {
        let rarely = student(
            Gender::Male,
            170.0,
            65.0,
            75.0,
            ExerciseFrequency::Rarely,
            FastfoodFrequency::Sometimes,
        );
        let mut often = rarely.clone();
        often.exercise = ExerciseFrequency::Often;
        let rarely_score = assess_risk(&rarely).unwrap().score;
        let often_score = assess_risk(&often).unwrap().score;
        assert_eq!(rarely_score - often_score, 25);
    }

    #[test]
    fn waist_thresholds_are_gender_conditioned() {
        assert_eq!(waist_points(Gender::Male, 90.0), 10);
        assert_eq!(waist_points(Gender::Male, 90.1), 20);
        assert_eq!(waist_points(Gender::Male, 85.0), 0);
        assert_eq!(waist_points(Gender::Female, 85.1), 20);
        assert_eq!(waist_points(Gender::Female, 80.1), 10);
        assert_eq!(waist_points(Gender::Female, 80.0), 0);
    }

    #[test]
    fn rejects_out_of_range_fields() {
        let base = student(
            Gender::Male,
            170.0,
            60.0,
            75.0,
            ExerciseFrequency::Sometimes,
            FastfoodFrequency::Sometimes,
        );

        let mut aged = base.clone();
        aged.age = 25;
        assert_eq!(
            assess_risk(&aged).unwrap_err(),
            ValidationError::AgeOutOfRange(25)
        );

        let mut tall = base.clone();
        tall.height_cm = 210.0;
        assert_eq!(
            assess_risk(&tall).unwrap_err(),
            ValidationError::HeightOutOfRange(210.0)
        );

        let mut heavy = base.clone();
        heavy.weight_kg = 160.0;
        assert_eq!(
            assess_risk(&heavy).unwrap_err(),
            ValidationError::WeightOutOfRange(160.0)
        );

        let mut waist = base;
        waist.waist_cm = 30.0;
        assert_eq!(
            assess_risk(&waist).unwrap_err(),
            ValidationError::WaistOutOfRange(30.0)
        );
    }

    #[test]
    fn lifestyle_compat_ignores_diet_unless_exercise_is_often() {
        // Shipped behavior: diet chain only runs on the innermost branch.
        assert_eq!(
            lifestyle_points(true, ExerciseFrequency::Rarely, FastfoodFrequency::Daily),
            30
        );
        assert_eq!(
            lifestyle_points(true, ExerciseFrequency::Sometimes, FastfoodFrequency::Daily),
            15
        );
        assert_eq!(
            lifestyle_points(true, ExerciseFrequency::Often, FastfoodFrequency::Often),
            20
        );
        assert_eq!(
            lifestyle_points(true, ExerciseFrequency::Often, FastfoodFrequency::Sometimes),
            10
        );
        assert_eq!(
            lifestyle_points(true, ExerciseFrequency::Often, FastfoodFrequency::Rarely),
            0
        );
    }

    #[test]
    fn lifestyle_compat_daily_test_never_matches() {
        // The shipped daily check compares a concatenated string, so the
        // (often, daily) combination scores zero and stays low sub-risk.
        assert_eq!(
            lifestyle_points(true, ExerciseFrequency::Often, FastfoodFrequency::Daily),
            0
        );
        assert_eq!(
            lifestyle_risk(ExerciseFrequency::Often, FastfoodFrequency::Daily),
            SubRiskLevel::Low
        );
    }

    #[test]
    fn lifestyle_fixed_sums_both_terms() {
        assert_eq!(
            lifestyle_points(false, ExerciseFrequency::Rarely, FastfoodFrequency::Daily),
            60
        );
        assert_eq!(
            lifestyle_points(false, ExerciseFrequency::Sometimes, FastfoodFrequency::Often),
            35
        );
        assert_eq!(
            lifestyle_points(false, ExerciseFrequency::Often, FastfoodFrequency::Rarely),
            0
        );
    }

    #[test]
    fn physical_compat_collapses_to_thirty_points() {
        // Either trigger alone or both together land on 30, so the compat
        // path can never reach the high sub-risk bucket.
        assert_eq!(physical_points(true, 27.0, Gender::Male, 95.0), 30);
        assert_eq!(physical_points(true, 27.0, Gender::Male, 70.0), 30);
        assert_eq!(physical_points(true, 20.0, Gender::Female, 90.0), 30);
        assert_eq!(physical_points(true, 20.0, Gender::Female, 70.0), 0);
    }

    #[test]
    fn physical_fixed_sums_bmi_and_waist_terms() {
        assert_eq!(physical_points(false, 27.0, Gender::Male, 95.0), 60);
        assert_eq!(physical_points(false, 23.5, Gender::Male, 95.0), 45);
        assert_eq!(physical_points(false, 23.5, Gender::Female, 70.0), 15);
        assert_eq!(physical_points(false, 20.0, Gender::Female, 70.0), 0);
    }

    #[test]
    fn sub_risk_bucket_thresholds() {
        assert_eq!(bucket(19), SubRiskLevel::Low);
        assert_eq!(bucket(20), SubRiskLevel::Moderate);
        assert_eq!(bucket(39), SubRiskLevel::Moderate);
        assert_eq!(bucket(40), SubRiskLevel::High);
    }
}
