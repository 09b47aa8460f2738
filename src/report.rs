use std::fmt::Write;

use chrono::NaiveDate;

use crate::interpret::{
    self, CorrelationView, DistributionSlice, RegressionView, GLUCOSE_TARGET_KEY,
    INSUFFICIENT_DATA_MESSAGE, LIFESTYLE_INSUFFICIENT_DATA_MESSAGE,
};
use crate::payload::AnalysisPayload;

/// Renders a completed analysis payload as a markdown report. Interpretation
/// failures (contract violations in the correlation set) propagate; missing
/// sections render their placeholder line instead.
pub fn build_report(
    payload: &AnalysisPayload,
    generated_on: NaiveDate,
) -> Result<String, crate::error::InterpretError> {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Health Checkup Analysis Report");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Cohort Summary");

    let summary = &payload.summary;
    let _ = writeln!(output, "- Students analyzed: {}", summary.total_students);

    if let Some(risk) = &summary.diabetes_risk {
        let _ = writeln!(
            output,
            "- Students in the diabetes risk group: {}",
            risk.prediabetes + risk.diabetes
        );
    }
    if let Some(glucose) = &summary.blood_glucose {
        let _ = writeln!(output, "- Mean blood glucose: {:.1} mg/dL", glucose.mean);
        if let (Some(min), Some(max)) = (glucose.min, glucose.max) {
            let _ = writeln!(output, "- Blood glucose range: {min:.1}-{max:.1} mg/dL");
        }
        if let Some(std) = glucose.std {
            let _ = writeln!(output, "- Blood glucose std dev: {std:.1} mg/dL");
        }
    } else {
        let _ = writeln!(output, "- Mean blood glucose: N/A");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## BMI Distribution");
    match &summary.bmi {
        Some(counts) => write_distribution(&mut output, &interpret::bmi_distribution(counts)),
        None => {
            let _ = writeln!(output, "{INSUFFICIENT_DATA_MESSAGE}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Glucose Level Distribution");
    match &summary.diabetes_risk {
        Some(counts) => {
            write_distribution(&mut output, &interpret::glucose_level_distribution(counts))
        }
        None => {
            let _ = writeln!(output, "{INSUFFICIENT_DATA_MESSAGE}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Correlation with Blood Glucose");
    let correlation_view = match &payload.correlations {
        Some(correlations) => {
            interpret::correlations(&correlations.glucose_correlation, GLUCOSE_TARGET_KEY)?
        }
        None => CorrelationView::InsufficientData,
    };
    match correlation_view {
        CorrelationView::Series(bars) => {
            for bar in &bars {
                let _ = writeln!(
                    output,
                    "- {}: {:.3} ({} {} 상관관계)",
                    bar.label,
                    bar.coefficient,
                    bar.direction.label(),
                    bar.strength.label()
                );
            }
        }
        CorrelationView::InsufficientData => {
            let _ = writeln!(output, "{INSUFFICIENT_DATA_MESSAGE}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Lifestyle Impact on Blood Glucose");
    match interpret::regression(payload.lifestyle_impact.as_ref()) {
        RegressionView::Series {
            factors,
            r_squared_percent,
        } => {
            for factor in &factors {
                let _ = writeln!(
                    output,
                    "- {}: coefficient {:.3}, p-value {:.3}, {}",
                    factor.label,
                    factor.coefficient,
                    factor.p_value,
                    if factor.significant {
                        "significant"
                    } else {
                        "not significant"
                    }
                );
            }
            if let Some(percent) = r_squared_percent {
                let _ = writeln!(output, "- Model R²: {percent:.1}%");
            }
        }
        RegressionView::InsufficientData => {
            let _ = writeln!(output, "{LIFESTYLE_INSUFFICIENT_DATA_MESSAGE}");
        }
    }

    Ok(output)
}

fn write_distribution(output: &mut String, slices: &[DistributionSlice]) {
    for slice in slices {
        match slice.percentage {
            Some(percentage) => {
                let _ = writeln!(
                    output,
                    "- {}: {} students ({percentage:.1}%)",
                    slice.label, slice.count
                );
            }
            None => {
                let _ = writeln!(output, "- {}: {} students (N/A)", slice.label, slice.count);
            }
        }
    }
}
