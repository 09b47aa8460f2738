//! Polls the analysis backend until a job reaches a terminal state. The
//! backend is an injected collaborator; anything that can answer a
//! job-status query can drive the engine.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use uuid::Uuid;

use crate::error::{BackendError, PollError};
use crate::payload::{AnalysisPayload, JobStatus, JobStatusResponse};

pub trait AnalysisBackend {
    fn job_status(
        &self,
        job_id: Uuid,
    ) -> impl std::future::Future<Output = Result<JobStatusResponse, BackendError>> + Send;
}

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Constant delay between polls; the backend's job runtimes do not
    /// reward exponential backoff.
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            interval: Duration::from_secs(5),
            max_attempts: 60,
        }
    }
}

/// Fixed-delay poller with per-job single flight: a second `poll` call for a
/// job id already being polled fails immediately instead of doubling the
/// load. Separate job ids poll independently.
pub struct Poller<B> {
    backend: B,
    config: PollConfig,
    in_flight: Mutex<HashSet<Uuid>>,
}

impl<B: AnalysisBackend> Poller<B> {
    pub fn new(backend: B, config: PollConfig) -> Self {
        Poller {
            backend,
            config,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Queries the job until it terminates. `completed` yields the payload;
    /// `failed` and unrecognized statuses are terminal errors. Transient
    /// backend faults are retried like `processing` responses; running out
    /// of attempts is itself a terminal failure.
    pub async fn poll(&self, job_id: Uuid) -> Result<AnalysisPayload, PollError> {
        let _guard = InFlightGuard::acquire(&self.in_flight, job_id)?;

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.backend.job_status(job_id).await {
                Ok(response) => match response.status {
                    JobStatus::Completed => {
                        return response.data.ok_or(PollError::MissingPayload(job_id));
                    }
                    JobStatus::Failed => return Err(PollError::JobFailed(job_id)),
                    JobStatus::Unknown => {
                        return Err(PollError::UnrecognizedStatus { job_id });
                    }
                    JobStatus::Processing => {
                        log::debug!("job {job_id} still processing (attempt {attempt})");
                    }
                },
                Err(err) => {
                    log::debug!("transient backend fault for job {job_id}: {err}");
                }
            }

            if attempt >= self.config.max_attempts {
                return Err(PollError::RetriesExhausted {
                    job_id,
                    attempts: attempt,
                });
            }
            tokio::time::sleep(self.config.interval).await;
        }
    }
}

/// Marks a job id as in flight for the guard's lifetime. The set is only
/// ever locked briefly and never across an await.
struct InFlightGuard<'a> {
    set: &'a Mutex<HashSet<Uuid>>,
    job_id: Uuid,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<Uuid>>, job_id: Uuid) -> Result<Self, PollError> {
        let mut held = set.lock().unwrap_or_else(PoisonError::into_inner);
        if !held.insert(job_id) {
            return Err(PollError::AlreadyInFlight(job_id));
        }
        Ok(InFlightGuard { set, job_id })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.set.lock().unwrap_or_else(PoisonError::into_inner);
        held.remove(&self.job_id);
    }
}

/// Backend adapter over the analysis worker's results directory: the worker
/// drops `<job_id>.json` when a run terminates, so an absent file means the
/// job is still processing.
pub struct ResultDirBackend {
    results_dir: PathBuf,
}

impl ResultDirBackend {
    pub fn new(results_dir: PathBuf) -> Self {
        ResultDirBackend { results_dir }
    }
}

impl AnalysisBackend for ResultDirBackend {
    async fn job_status(&self, job_id: Uuid) -> Result<JobStatusResponse, BackendError> {
        let path = self.results_dir.join(format!("{job_id}.json"));
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(JobStatusResponse {
                status: JobStatus::Processing,
                data: None,
            }),
            Err(err) => Err(err.into()),
        }
    }
}
