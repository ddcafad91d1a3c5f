//! Parse job queue: bounded channel, semaphore-capped worker pool,
//! fire-and-forget submission.
//!
//! The upload endpoint responds as soon as a job is accepted; parse
//! outcomes never reach the HTTP caller. A full queue rejects the
//! submission and the upload fails; jobs are never dropped silently.

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::{mpsc, Semaphore};

use logbay_core::models::LogFileProperties;
use logbay_storage::merge;

use crate::context::ParseContext;

/// A unit of background parse work. The job owns its properties snapshot;
/// the endpoint does not touch the staged file again after submission.
#[derive(Debug, Clone)]
pub struct ParseJob {
    pub properties: LogFileProperties,
}

#[derive(Clone)]
pub struct ParseQueueConfig {
    /// Maximum jobs executing at once.
    pub max_concurrent: usize,
    /// Channel capacity; submissions beyond this are rejected.
    pub queue_size: usize,
}

impl Default for ParseQueueConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            queue_size: 1000,
        }
    }
}

pub struct ParseJobQueue {
    tx: mpsc::Sender<ParseJob>,
}

impl ParseJobQueue {
    /// Create a queue and spawn its worker pool. The context is captured
    /// here; jobs carry only their properties snapshot.
    pub fn new(context: ParseContext, config: ParseQueueConfig) -> Self {
        let queue_size = config.queue_size.max(1);
        let max_concurrent = config.max_concurrent.max(1);
        let (tx, rx) = mpsc::channel(queue_size);

        tokio::spawn(async move {
            Self::worker_pool(rx, context, max_concurrent).await;
        });

        tracing::info!(
            queue_size = queue_size,
            max_concurrent = max_concurrent,
            "Parse job queue initialized with bounded channel"
        );

        Self { tx }
    }

    /// Enqueue a job without waiting for completion. A full queue is an
    /// error the caller must surface; acceptance transfers ownership of the
    /// job's fate to the pool.
    #[tracing::instrument(skip(self, job), fields(filename = %job.properties.filename))]
    pub fn submit(&self, job: ParseJob) -> Result<()> {
        self.tx.try_send(job).map_err(|e| match &e {
            mpsc::error::TrySendError::Full(_) => {
                tracing::warn!("Parse job queue is full, rejecting job");
                anyhow::anyhow!("Parse job queue is full, please try again later")
            }
            _ => anyhow::anyhow!("Failed to submit parse job: {}", e),
        })?;
        Ok(())
    }

    async fn worker_pool(
        mut rx: mpsc::Receiver<ParseJob>,
        context: ParseContext,
        max_concurrent: usize,
    ) {
        let semaphore = Arc::new(Semaphore::new(max_concurrent));

        while let Some(job) = rx.recv().await {
            let permit = semaphore.clone().acquire_owned().await;
            let context = context.clone();

            tokio::spawn(async move {
                let _permit = permit;
                if let Err(e) = Self::process_job(job, context).await {
                    tracing::error!(error = %e, "Parse job failed");
                }
            });
        }
    }

    #[tracing::instrument(
        skip(job, context),
        fields(
            filename = %job.properties.filename,
            uid = %job.properties.uid,
            app_id = %job.properties.app_id,
            job.status = tracing::field::Empty,
        )
    )]
    async fn process_job(job: ParseJob, context: ParseContext) -> Result<()> {
        let start = std::time::Instant::now();
        let properties = &job.properties;
        tracing::info!(
            original_filename = %properties.original_filename,
            level = properties.level,
            "Starting log parse job"
        );

        let result = Self::run_parse(properties, &context).await;
        let elapsed = start.elapsed();

        match result {
            Ok(parts) => {
                tracing::Span::current().record("job.status", "success");
                tracing::info!(
                    parts = parts,
                    duration_ms = elapsed.as_millis(),
                    "Log parse completed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::Span::current().record("job.status", "failed");
                tracing::error!(
                    error = %e,
                    duration_ms = elapsed.as_millis(),
                    "Log parse failed"
                );
                Err(e)
            }
        }
    }

    /// Parse, merge the returned parts into the parsed artifact, and drop
    /// the staged input. Returns the number of merged parts.
    async fn run_parse(properties: &LogFileProperties, context: &ParseContext) -> Result<usize> {
        let parts = context
            .parser
            .parse(properties, context.decrypt_errors.as_ref())
            .await?;

        let parsed_file = properties.parsed_file();
        merge::merge(&parsed_file, &parts)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to merge parse output: {}", e))?;

        let staged = properties.work_file();
        if !merge::remove_files(std::slice::from_ref(&staged)).await {
            tracing::warn!(path = %staged.display(), "Staged input left behind after parse");
        }

        Ok(parts.len())
    }
}

impl Clone for ParseJobQueue {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}
