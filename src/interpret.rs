//! Turns externally computed aggregates into labeled, ordered series for
//! presentation. No statistics happen here; the adapters only classify,
//! rank, and color numbers the backend already produced.

use serde::Serialize;

use crate::error::InterpretError;
use crate::payload::{BmiCounts, CorrelationSet, GlucoseLevelCounts, LifestyleImpact};

/// The correlation matrix includes the target variable's self-correlation;
/// this key is dropped before display.
pub const GLUCOSE_TARGET_KEY: &str = "혈당치_mgdL";

/// Placeholder copy shown when a chart has nothing to draw.
pub const INSUFFICIENT_DATA_MESSAGE: &str = "분석에 필요한 충분한 데이터가 없습니다";

/// The lifestyle-impact chart carries its own wording for the same case.
pub const LIFESTYLE_INSUFFICIENT_DATA_MESSAGE: &str =
    "생활습관 요인 분석에 필요한 충분한 데이터가 없습니다";

const UNIT_SUFFIXES: [&str; 3] = ["_mgdL", "_cm", "_kg"];
const PHRASE_SUFFIXES: [(&str, &str); 3] = [
    ("주3회이상", "주3회+"),
    ("하루30분이상", "30분+"),
    ("2시간이상", "2시간+"),
];

/// One bar of a categorical distribution chart. `percentage` is `None` when
/// the group total is zero, rendered as "N/A".
#[derive(Debug, Clone, Serialize)]
pub struct DistributionSlice {
    pub label: &'static str,
    pub count: u64,
    pub percentage: Option<f64>,
    pub color: &'static str,
}

pub fn bmi_distribution(counts: &BmiCounts) -> Vec<DistributionSlice> {
    distribution(&[
        ("저체중", counts.underweight, "#1890ff"),
        ("정상", counts.normal, "#52c41a"),
        ("과체중", counts.overweight, "#faad14"),
        ("비만", counts.obese, "#f5222d"),
    ])
}

pub fn glucose_level_distribution(counts: &GlucoseLevelCounts) -> Vec<DistributionSlice> {
    distribution(&[
        ("정상", counts.normal, "#52c41a"),
        ("전당뇨", counts.prediabetes, "#faad14"),
        ("당뇨의심", counts.diabetes, "#f5222d"),
    ])
}

fn distribution(categories: &[(&'static str, u64, &'static str)]) -> Vec<DistributionSlice> {
    let total: u64 = categories.iter().map(|(_, count, _)| count).sum();
    categories
        .iter()
        .map(|&(label, count, color)| DistributionSlice {
            label,
            count,
            percentage: if total == 0 {
                None
            } else {
                Some(round1(count as f64 / total as f64 * 100.0))
            },
            color,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    pub fn label(&self) -> &'static str {
        match self {
            Direction::Positive => "양의",
            Direction::Negative => "음의",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    fn from_coefficient(coefficient: f64) -> Self {
        let magnitude = coefficient.abs();
        if magnitude > 0.7 {
            Strength::Strong
        } else if magnitude > 0.3 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Strength::Strong => "강한",
            Strength::Moderate => "중간",
            Strength::Weak => "약한",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CorrelationBar {
    pub label: String,
    pub coefficient: f64,
    pub direction: Direction,
    pub strength: Strength,
    /// Hue by sign, intensity by magnitude.
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrelationView {
    Series(Vec<CorrelationBar>),
    InsufficientData,
}

/// Classifies a correlation set against its target variable. Coefficients
/// outside [-1, 1] violate the backend contract and are rejected outright.
/// An empty set (after dropping the target key) becomes the placeholder,
/// never a zero-length series.
pub fn correlations(
    set: &CorrelationSet,
    target_key: &str,
) -> Result<CorrelationView, InterpretError> {
    for (factor, value) in &set.0 {
        if !(-1.0..=1.0).contains(value) {
            return Err(InterpretError::CoefficientOutOfRange {
                factor: factor.clone(),
                value: *value,
            });
        }
    }

    let bars: Vec<CorrelationBar> = set
        .0
        .iter()
        .filter(|(factor, _)| factor != target_key)
        .map(|&(ref factor, coefficient)| CorrelationBar {
            label: strip_units(factor),
            coefficient,
            direction: if coefficient > 0.0 {
                Direction::Positive
            } else {
                Direction::Negative
            },
            strength: Strength::from_coefficient(coefficient),
            color: correlation_color(coefficient),
        })
        .collect();

    if bars.is_empty() {
        Ok(CorrelationView::InsufficientData)
    } else {
        Ok(CorrelationView::Series(bars))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegressionBar {
    pub label: String,
    pub coefficient: f64,
    pub p_value: f64,
    pub significant: bool,
    /// Sign picks the hue; significance picks full or faded opacity.
    pub color: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressionView {
    Series {
        factors: Vec<RegressionBar>,
        r_squared_percent: Option<f64>,
    },
    InsufficientData,
}

/// Ranks regression factors by influence. The intercept never competes with
/// real factors; zero coefficients are kept and, like all magnitude ties,
/// stay in document order. Missing or empty data yields the placeholder.
pub fn regression(impact: Option<&LifestyleImpact>) -> RegressionView {
    let Some(impact) = impact else {
        return RegressionView::InsufficientData;
    };

    let mut factors: Vec<RegressionBar> = impact
        .coefficients
        .0
        .iter()
        .filter(|(factor, _)| factor != "const" && factor != "intercept")
        .map(|(factor, entry)| RegressionBar {
            label: simplify_label(factor),
            coefficient: entry.coefficient,
            p_value: entry.p_value,
            significant: entry.significant,
            color: regression_color(entry.coefficient, entry.significant),
        })
        .collect();

    if factors.is_empty() {
        return RegressionView::InsufficientData;
    }

    // Stable sort keeps document order among equal magnitudes.
    factors.sort_by(|a, b| {
        b.coefficient
            .abs()
            .partial_cmp(&a.coefficient.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    RegressionView::Series {
        r_squared_percent: impact
            .model_summary
            .as_ref()
            .map(|summary| round1(summary.r_squared * 100.0)),
        factors,
    }
}

fn strip_units(factor: &str) -> String {
    let mut label = factor.to_string();
    for suffix in UNIT_SUFFIXES {
        label = label.replace(suffix, "");
    }
    label
}

fn simplify_label(factor: &str) -> String {
    let mut label = factor.to_string();
    for (long, short) in PHRASE_SUFFIXES {
        label = label.replace(long, short);
    }
    for suffix in UNIT_SUFFIXES {
        label = label.replace(suffix, "");
    }
    label
}

fn correlation_color(coefficient: f64) -> String {
    let alpha = coefficient.abs();
    if coefficient < 0.0 {
        format!("rgba(24, 144, 255, {alpha:.2})")
    } else {
        format!("rgba(245, 34, 45, {alpha:.2})")
    }
}

fn regression_color(coefficient: f64, significant: bool) -> &'static str {
    match (coefficient > 0.0, significant) {
        (true, true) => "rgba(245, 34, 45, 0.9)",
        (true, false) => "rgba(245, 34, 45, 0.4)",
        (false, true) => "rgba(24, 144, 255, 0.9)",
        (false, false) => "rgba(24, 144, 255, 0.4)",
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
