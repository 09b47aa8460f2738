use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseFrequency {
    Rarely,
    Sometimes,
    Often,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FastfoodFrequency {
    Rarely,
    Sometimes,
    Often,
    Daily,
}

/// One student's checkup record, as entered in the prediction form or a
/// batch CSV row. Constructed once per assessment; never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentInput {
    pub age: u8,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub waist_cm: f64,
    pub exercise: ExerciseFrequency,
    pub fastfood: FastfoodFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 23.0 {
            BmiCategory::Normal
        } else if bmi < 25.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "저체중",
            BmiCategory::Normal => "정상",
            BmiCategory::Overweight => "과체중",
            BmiCategory::Obese => "비만",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiResult {
    pub value: f64,
    pub category: BmiCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn from_score(score: i32) -> Self {
        if score < 30 {
            RiskLevel::Low
        } else if score < 60 {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }

    /// Fixed advisory copy shown with each level.
    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::Low => "당뇨 위험도가 낮습니다. 건강한 생활습관을 유지하세요.",
            RiskLevel::Medium => {
                "당뇨 위험도가 중간 수준입니다. 식습관과 운동에 주의가 필요합니다."
            }
            RiskLevel::High => "당뇨 위험도가 높습니다. 전문의 상담을 권장합니다.",
        }
    }
}

/// Three-step level used by the lifestyle and physical sub-risk breakdowns.
/// Buckets on a smaller point scale than [`RiskLevel`]; the two must not be
/// conflated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SubRiskLevel {
    #[serde(rename = "낮음")]
    Low,
    #[serde(rename = "중간")]
    Moderate,
    #[serde(rename = "높음")]
    High,
}

impl SubRiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            SubRiskLevel::Low => "낮음",
            SubRiskLevel::Moderate => "중간",
            SubRiskLevel::High => "높음",
        }
    }
}

/// Full assessment returned for one student. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct RiskAssessment {
    pub score: i32,
    pub level: RiskLevel,
    pub message: &'static str,
    pub bmi: BmiResult,
    pub lifestyle_risk: SubRiskLevel,
    pub physical_risk: SubRiskLevel,
}
