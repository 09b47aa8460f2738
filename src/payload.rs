//! Wire types for the analysis backend's job-status contract. The engine
//! consumes these read-only; the statistics themselves are computed by the
//! backend collaborator.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Processing,
    Completed,
    Failed,
    /// Any wire status this build does not know. Treated as a terminal
    /// failure, never retried.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub data: Option<AnalysisPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisPayload {
    pub summary: AnalysisSummary,
    #[serde(default)]
    pub correlations: Option<Correlations>,
    #[serde(default)]
    pub lifestyle_impact: Option<LifestyleImpact>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisSummary {
    pub total_students: u64,
    #[serde(default)]
    pub bmi: Option<BmiCounts>,
    #[serde(default)]
    pub diabetes_risk: Option<GlucoseLevelCounts>,
    #[serde(default)]
    pub blood_glucose: Option<BloodGlucoseStats>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BmiCounts {
    pub underweight: u64,
    pub normal: u64,
    pub overweight: u64,
    pub obese: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct GlucoseLevelCounts {
    pub normal: u64,
    pub prediabetes: u64,
    pub diabetes: u64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BloodGlucoseStats {
    pub mean: f64,
    #[serde(default)]
    pub std: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Correlations {
    pub glucose_correlation: CorrelationSet,
}

/// Factor-to-coefficient pairs in document order. The backend emits a JSON
/// object; its key order is kept because the adapters break ranking ties by
/// original position.
#[derive(Debug, Clone, Default)]
pub struct CorrelationSet(pub Vec<(String, f64)>);

impl<'de> Deserialize<'de> for CorrelationSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = CorrelationSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of factor names to correlation coefficients")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, f64>()? {
                    pairs.push(entry);
                }
                Ok(CorrelationSet(pairs))
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LifestyleImpact {
    pub coefficients: RegressionResult,
    #[serde(default)]
    pub model_summary: Option<ModelSummary>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegressionCoefficient {
    pub coefficient: f64,
    pub p_value: f64,
    pub significant: bool,
}

/// Factor-to-coefficient regression entries, again in document order.
#[derive(Debug, Clone, Default)]
pub struct RegressionResult(pub Vec<(String, RegressionCoefficient)>);

impl<'de> Deserialize<'de> for RegressionResult {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResultVisitor;

        impl<'de> Visitor<'de> for ResultVisitor {
            type Value = RegressionResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of factor names to regression coefficient entries")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RegressionCoefficient>()? {
                    pairs.push(entry);
                }
                Ok(RegressionResult(pairs))
            }
        }

        deserializer.deserialize_map(ResultVisitor)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ModelSummary {
    pub r_squared: f64,
}
