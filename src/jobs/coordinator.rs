//! Job coordination and submission dedup
//!
//! The coordinator is the only writer of job state. It accepts submissions,
//! validates them against the latest committed preview, enforces at most one
//! live job per resource, and drives accepted jobs through the executor on
//! background tasks.

use crate::executor::{ExecutionRequest, JobRunner, TransferProgress};
use crate::jobs::models::{DownloadJob, JobStatus};
use crate::preview::PreviewCache;
use crate::resolver::SourceRules;
use crate::resource::ResourceKey;
use crate::utils::error::ValidationError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{error, info};

/// Jobs by id, plus the newest job per resource for the dedup check.
///
/// Entries are never removed; a terminal job stays pollable until the
/// process exits.
#[derive(Debug, Default)]
struct JobTable {
    jobs: HashMap<String, DownloadJob>,
    latest_by_key: HashMap<ResourceKey, String>,
}

/// Handle onto one job, for status polling.
#[derive(Debug, Clone)]
pub struct JobHandle {
    id: String,
    table: Arc<Mutex<JobTable>>,
}

impl JobHandle {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn status(&self) -> Option<JobStatus> {
        let table = self.table.lock().await;
        table.jobs.get(&self.id).map(|job| job.status)
    }

    pub async fn snapshot(&self) -> Option<DownloadJob> {
        let table = self.table.lock().await;
        table.jobs.get(&self.id).cloned()
    }
}

/// Accepts download submissions and owns every job's lifecycle.
pub struct JobCoordinator {
    preview: Arc<PreviewCache>,
    runner: Arc<dyn JobRunner>,
    rules: SourceRules,
    table: Arc<Mutex<JobTable>>,
}

impl JobCoordinator {
    pub fn new(preview: Arc<PreviewCache>, runner: Arc<dyn JobRunner>, rules: SourceRules) -> Self {
        Self {
            preview,
            runner,
            rules,
            table: Arc::new(Mutex::new(JobTable::default())),
        }
    }

    /// Submit a download.
    ///
    /// Format ids are checked against the latest committed preview for the
    /// resource; a submission for a resource that was never previewed is an
    /// unknown-format rejection. While a job for the resource is Pending or
    /// Running, resubmission returns its handle instead of a new job.
    pub async fn submit(
        &self,
        url: &str,
        audio_format_id: &str,
        video_format_id: &str,
    ) -> Result<JobHandle, ValidationError> {
        self.rules.check(url)?;
        let key = ResourceKey::from_url(url);

        let preview = match self.preview.peek(&key).await {
            Some(preview) => preview,
            None => {
                // No preview committed means no id can possibly match.
                return Err(ValidationError::UnknownFormat(video_format_id.to_string()));
            }
        };

        // A coinciding pair selects one combined stream; it may live in
        // either list. Distinct ids must each come from their own list.
        let combined = audio_format_id == video_format_id;
        let container_ext = if combined {
            match preview.format_ext(video_format_id) {
                Some(ext) => ext.to_string(),
                None => {
                    return Err(ValidationError::UnknownFormat(video_format_id.to_string()));
                }
            }
        } else {
            if preview.audio_format(audio_format_id).is_none() {
                return Err(ValidationError::UnknownFormat(audio_format_id.to_string()));
            }
            match preview.video_format(video_format_id) {
                Some(format) => format.ext.clone(),
                None => {
                    return Err(ValidationError::UnknownFormat(video_format_id.to_string()));
                }
            }
        };

        let job = {
            let mut table = self.table.lock().await;

            if let Some(existing_id) = table.latest_by_key.get(&key) {
                if let Some(existing) = table.jobs.get(existing_id) {
                    if !existing.status.is_terminal() {
                        info!(
                            "submission for {} joins live job {}",
                            key, existing.id
                        );
                        return Ok(JobHandle {
                            id: existing.id.clone(),
                            table: Arc::clone(&self.table),
                        });
                    }
                }
            }

            let job = DownloadJob::new(key.clone(), url, audio_format_id, video_format_id);
            table.latest_by_key.insert(key, job.id.clone());
            table.jobs.insert(job.id.clone(), job.clone());
            job
        };

        let job_id = job.id.clone();
        info!("accepted job {} for {}", job_id, job.url);
        self.dispatch(job, preview.title.clone(), container_ext);

        Ok(JobHandle {
            id: job_id,
            table: Arc::clone(&self.table),
        })
    }

    /// Snapshot of one job.
    pub async fn job(&self, id: &str) -> Option<DownloadJob> {
        let table = self.table.lock().await;
        table.jobs.get(id).cloned()
    }

    /// Hand a freshly created job to the executor on background tasks.
    ///
    /// One task forwards progress frames onto the job record; the other runs
    /// the job and writes its terminal state. Mirrors the rule that only
    /// executor outcomes drive transitions after Pending.
    fn dispatch(&self, job: DownloadJob, title: String, container_ext: String) {
        let request = ExecutionRequest {
            job_id: job.id.clone(),
            url: job.url.clone(),
            audio_format_id: job.audio_format_id.clone(),
            video_format_id: job.video_format_id.clone(),
            title,
            container_ext,
        };

        let (progress_tx, mut progress_rx) = mpsc::channel::<TransferProgress>(100);

        let progress_table = Arc::clone(&self.table);
        let progress_job_id = job.id.clone();
        tokio::spawn(async move {
            while let Some(progress) = progress_rx.recv().await {
                let mut table = progress_table.lock().await;
                if let Some(job) = table.jobs.get_mut(&progress_job_id) {
                    job.progress = Some(progress);
                }
            }
        });

        let runner = Arc::clone(&self.runner);
        let run_table = Arc::clone(&self.table);
        let job_id = job.id;
        tokio::spawn(async move {
            {
                let mut table = run_table.lock().await;
                if let Some(job) = table.jobs.get_mut(&job_id) {
                    job.status = JobStatus::Running;
                }
            }

            let outcome = runner.run(request, progress_tx).await;

            let mut table = run_table.lock().await;
            if let Some(job) = table.jobs.get_mut(&job_id) {
                match outcome {
                    Ok(path) => {
                        info!("job {} completed: {}", job_id, path.display());
                        job.status = JobStatus::Completed;
                        job.output_path = Some(path);
                    }
                    Err(e) => {
                        error!("job {} failed: {}", job_id, e);
                        job.status = JobStatus::Failed;
                        job.error = Some(format!("{}: {}", e.kind(), e));
                    }
                }
            }
        });
    }
}
