//! Per-stage batch orchestration.
//!
//! Applies a generation function to every item of a batch independently:
//! item failures are logged and skipped, a fixed inter-item delay paces
//! provider calls, and an overall stage deadline bounds the batch. Items
//! completed before the deadline fires are preserved as a partial result.

use std::future::Future;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{PipelineError, PipelineResult};

/// Whether a batch ran against real providers or local placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationMode {
    Real,
    Placeholder,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Real => "real",
            GenerationMode::Placeholder => "placeholder",
        }
    }
}

/// Options for one batch run.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Stage name for logs and errors
    pub stage: &'static str,
    /// Real generation or offline placeholder mode
    pub mode: GenerationMode,
    /// Cooperative pacing delay between items
    pub item_delay: Duration,
    /// Deadline for the whole batch
    pub deadline: Duration,
}

/// Run `generate` over every item of a batch.
///
/// Returns between 1 and N artifacts, or `NoArtifactsProduced` when every
/// item failed. The deadline is enforced with the remaining budget around
/// each item, so an in-flight generation aborts promptly when it fires;
/// artifacts already produced are returned as a partial success.
pub async fn run_batch<I, T, F, Fut>(
    opts: &BatchOptions,
    items: Vec<I>,
    mut generate: F,
) -> PipelineResult<Vec<T>>
where
    F: FnMut(I) -> Fut,
    Fut: Future<Output = PipelineResult<T>>,
{
    let attempted = items.len();
    let started = Instant::now();
    let mut produced = Vec::new();
    let mut cut_off = false;

    info!(
        stage = opts.stage,
        mode = opts.mode.as_str(),
        items = attempted,
        "Starting batch"
    );

    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            tokio::time::sleep(opts.item_delay).await;
        }

        let Some(remaining) = opts.deadline.checked_sub(started.elapsed()) else {
            cut_off = true;
            break;
        };

        match tokio::time::timeout(remaining, generate(item)).await {
            Ok(Ok(artifact)) => produced.push(artifact),
            Ok(Err(e)) => {
                warn!(stage = opts.stage, item = index, "Item failed, skipping: {}", e);
            }
            Err(_) => {
                warn!(
                    stage = opts.stage,
                    item = index,
                    "Stage deadline reached mid-item, aborting batch"
                );
                cut_off = true;
                break;
            }
        }
    }

    info!(
        stage = opts.stage,
        mode = opts.mode.as_str(),
        attempted,
        succeeded = produced.len(),
        deadline_cut_off = cut_off,
        "Batch finished"
    );

    if produced.is_empty() {
        Err(PipelineError::NoArtifactsProduced { stage: opts.stage })
    } else {
        Ok(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(deadline: Duration) -> BatchOptions {
        BatchOptions {
            stage: "test",
            mode: GenerationMode::Real,
            item_delay: Duration::from_millis(1),
            deadline,
        }
    }

    #[tokio::test]
    async fn test_partial_failure_returns_successes() {
        let result = run_batch(&opts(Duration::from_secs(5)), vec![1, 2, 3], |n| async move {
            if n == 2 {
                Err(PipelineError::NoInputImages("x".into()))
            } else {
                Ok(n * 10)
            }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![10, 30]);
    }

    #[tokio::test]
    async fn test_all_failures_surface_no_artifacts() {
        let err = run_batch(&opts(Duration::from_secs(5)), vec![1, 2], |_| async {
            Err::<u32, _>(PipelineError::NoInputImages("x".into()))
        })
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::NoArtifactsProduced { stage: "test" }
        ));
    }

    #[tokio::test]
    async fn test_output_never_exceeds_input() {
        let result = run_batch(&opts(Duration::from_secs(5)), vec![1, 2, 3], |n| async move {
            Ok::<_, PipelineError>(n)
        })
        .await
        .unwrap();
        assert_eq!(result.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_preserves_completed_items() {
        let result = run_batch(
            &opts(Duration::from_millis(50)),
            vec![1, 2, 3],
            |n| async move {
                if n > 1 {
                    // Second item never finishes within the deadline
                    tokio::time::sleep(Duration::from_secs(60)).await;
                }
                Ok::<_, PipelineError>(n)
            },
        )
        .await
        .unwrap();

        assert_eq!(result, vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_with_nothing_completed_is_fatal() {
        let err = run_batch(&opts(Duration::from_millis(10)), vec![1], |_| async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, PipelineError>(0)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, PipelineError::NoArtifactsProduced { .. }));
    }
}
