use thiserror::Error;
use uuid::Uuid;

/// A StudentInput field sits outside its plausible clinical range. Raised
/// before any scoring happens; there is no partial assessment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("age {0} is outside the supported range of 6-19 years")]
    AgeOutOfRange(u8),
    #[error("height {0} cm is outside the plausible range of 100-200 cm")]
    HeightOutOfRange(f64),
    #[error("weight {0} kg is outside the plausible range of 20-150 kg")]
    WeightOutOfRange(f64),
    #[error("waist {0} cm is outside the plausible range of 40-150 cm")]
    WaistOutOfRange(f64),
}

/// Contract violation in an aggregate payload. Insufficient data is not an
/// error; the adapters answer that with a placeholder value instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpretError {
    #[error("correlation coefficient {value} for \"{factor}\" is outside [-1, 1]")]
    CoefficientOutOfRange { factor: String, value: f64 },
}

/// Transport fault while asking the backend for a job status. Retried by the
/// poller; never surfaced to callers directly.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to read job status: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed job status document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Terminal outcomes of a polling session.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("analysis job {0} failed")]
    JobFailed(Uuid),
    #[error("analysis job {job_id} reported an unrecognized status")]
    UnrecognizedStatus { job_id: Uuid },
    #[error("analysis job {0} completed without a payload")]
    MissingPayload(Uuid),
    #[error("analysis job {job_id} still processing after {attempts} attempts")]
    RetriesExhausted { job_id: Uuid, attempts: u32 },
    #[error("a poll for analysis job {0} is already in flight")]
    AlreadyInFlight(Uuid),
}
