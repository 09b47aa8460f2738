use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Utc;
use clap::{Parser, Subcommand};
use uuid::Uuid;

mod error;
mod interpret;
mod models;
mod payload;
mod poll;
mod report;
mod risk;

use models::{ExerciseFrequency, FastfoodFrequency, Gender, RiskAssessment, StudentInput};
use payload::{AnalysisPayload, JobStatus, JobStatusResponse};
use poll::{PollConfig, Poller, ResultDirBackend};

#[derive(Parser)]
#[command(name = "student-health-risk")]
#[command(
    about = "Diabetes risk scoring and analysis interpretation for student health checkups",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score diabetes risk for a single student
    Assess {
        #[arg(long)]
        age: u8,
        #[arg(long, value_enum)]
        gender: Gender,
        #[arg(long)]
        height_cm: f64,
        #[arg(long)]
        weight_kg: f64,
        #[arg(long)]
        waist_cm: f64,
        #[arg(long, value_enum)]
        exercise: ExerciseFrequency,
        #[arg(long, value_enum)]
        fastfood: FastfoodFrequency,
    },
    /// Score every student row in a CSV file
    Batch {
        #[arg(long)]
        csv: PathBuf,
    },
    /// Build a markdown report from a completed analysis document
    Interpret {
        #[arg(long)]
        json: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Poll a results directory until an analysis job finishes, then report
    Poll {
        #[arg(long)]
        results_dir: PathBuf,
        #[arg(long)]
        job_id: Uuid,
        #[arg(long, default_value_t = 5)]
        interval_secs: u64,
        #[arg(long, default_value_t = 60)]
        max_attempts: u32,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Assess {
            age,
            gender,
            height_cm,
            weight_kg,
            waist_cm,
            exercise,
            fastfood,
        } => {
            let input = StudentInput {
                age,
                gender,
                height_cm,
                weight_kg,
                waist_cm,
                exercise,
                fastfood,
            };
            let assessment = risk::assess_risk(&input)?;
            print_assessment(&assessment);
        }
        Commands::Batch { csv } => {
            let scored = batch_assess(&csv)?;
            println!("Scored {scored} students from {}.", csv.display());
        }
        Commands::Interpret { json, out } => {
            let payload = load_payload(&json)?;
            let report = report::build_report(&payload, Utc::now().date_naive())?;
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
        Commands::Poll {
            results_dir,
            job_id,
            interval_secs,
            max_attempts,
            out,
        } => {
            let poller = Poller::new(
                ResultDirBackend::new(results_dir),
                PollConfig {
                    interval: Duration::from_secs(interval_secs),
                    max_attempts,
                },
            );
            let payload = poller.poll(job_id).await?;
            let report = report::build_report(&payload, Utc::now().date_naive())?;
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn print_assessment(assessment: &RiskAssessment) {
    println!(
        "Diabetes risk score: {} / 100 ({})",
        assessment.score,
        assessment.level.as_str()
    );
    println!("{}", assessment.message);
    println!(
        "BMI {:.1} ({}), lifestyle risk {}, physical risk {}",
        assessment.bmi.value,
        assessment.bmi.category.label(),
        assessment.lifestyle_risk.label(),
        assessment.physical_risk.label()
    );
}

/// Scores each CSV row, skipping and logging rows that fail validation so a
/// single bad record cannot sink a whole batch.
fn batch_assess(csv_path: &Path) -> anyhow::Result<usize> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut scored = 0usize;

    for (index, row) in reader.deserialize::<StudentInput>().enumerate() {
        let line = index + 2; // header is line 1
        let input = match row {
            Ok(input) => input,
            Err(err) => {
                log::warn!("skipping row at line {line}: {err}");
                continue;
            }
        };
        match risk::assess_risk(&input) {
            Ok(assessment) => {
                println!(
                    "- line {line}: score {} ({}), BMI {:.1} ({})",
                    assessment.score,
                    assessment.level.as_str(),
                    assessment.bmi.value,
                    assessment.bmi.category.label()
                );
                scored += 1;
            }
            Err(err) => log::warn!("skipping row at line {line}: {err}"),
        }
    }

    Ok(scored)
}

/// Accepts either a job-status document (`{status, data}`) or a bare
/// analysis payload.
fn load_payload(path: &Path) -> anyhow::Result<AnalysisPayload> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    if let Ok(doc) = serde_json::from_str::<JobStatusResponse>(&text) {
        if doc.status != JobStatus::Completed {
            bail!("analysis document reports a non-completed status");
        }
        return doc.data.context("analysis document has no data section");
    }

    serde_json::from_str(&text).context("not a valid analysis payload document")
}
