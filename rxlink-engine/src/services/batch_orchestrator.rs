//! Batch fan-out across a bounded worker pool
//!
//! Processes one bounded chunk at a time: records fan out across
//! `max_workers` concurrent resolutions, results collect in completion
//! order, and a per-chunk side-effect hook runs to completion before the
//! next chunk starts. The pause between chunks is a deliberate throttle for
//! the remote service, not an accident of scheduling.

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

use rxlink_common::EngineConfig;

use crate::models::{BatchOutcome, BatchSummary, NdcMatch, NdcProduct, ResolveOutcome};
use crate::services::match_resolver::MatchResolver;

/// Batch processing knobs
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Worker-pool size within a chunk
    pub max_workers: usize,
    /// Records per durability chunk
    pub chunk_size: usize,
    /// Pause between chunks
    pub chunk_pause: std::time::Duration,
}

impl BatchConfig {
    pub fn from_engine(config: &EngineConfig) -> Self {
        Self {
            max_workers: config.max_workers,
            chunk_size: config.chunk_size,
            chunk_pause: config.chunk_pause(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self::from_engine(&EngineConfig::default())
    }
}

/// Fans record resolution out across a bounded worker pool
pub struct BatchOrchestrator {
    resolver: Arc<MatchResolver>,
    config: BatchConfig,
}

impl BatchOrchestrator {
    pub fn new(resolver: Arc<MatchResolver>, config: BatchConfig) -> Self {
        Self { resolver, config }
    }

    /// Process a batch with no per-chunk side effect
    pub async fn process_batch(&self, products: &[NdcProduct]) -> BatchOutcome {
        fn noop(_: &[NdcMatch]) -> BoxFuture<'_, rxlink_common::Result<()>> {
            Box::pin(async { Ok(()) })
        }
        match self.process_batch_with(products, noop).await {
            Ok(outcome) => outcome,
            Err(_) => unreachable!("no-op chunk hook never fails"),
        }
    }

    /// Process a batch, awaiting `on_chunk` after each chunk completes
    ///
    /// The hook receives exactly that chunk's matches (in completion order)
    /// and must finish before the next chunk starts; this is the durability
    /// point for very large inputs. A hook error aborts the batch. Output
    /// order within a chunk is unspecified; chunk boundaries serialize.
    pub async fn process_batch_with<F>(
        &self,
        products: &[NdcProduct],
        mut on_chunk: F,
    ) -> rxlink_common::Result<BatchOutcome>
    where
        F: for<'c> FnMut(&'c [NdcMatch]) -> BoxFuture<'c, rxlink_common::Result<()>>,
    {
        let started = Instant::now();
        let chunk_size = self.config.chunk_size.max(1);
        let total_chunks = (products.len() + chunk_size - 1) / chunk_size;

        tracing::info!(
            records = products.len(),
            chunks = total_chunks,
            workers = self.config.max_workers,
            "Starting batch resolution"
        );

        let mut matches = Vec::new();
        let mut missed = 0usize;
        let mut failed = 0usize;

        for (index, chunk) in products.chunks(chunk_size).enumerate() {
            // One record's failure never cancels or stalls its siblings: the
            // resolver already converted errors to Failed outcomes, so every
            // worker runs to completion independently.
            let outcomes: Vec<ResolveOutcome> = stream::iter(chunk)
                .map(|product| {
                    let resolver = Arc::clone(&self.resolver);
                    async move { resolver.resolve(product).await }
                })
                .buffer_unordered(self.config.max_workers.max(1))
                .collect()
                .await;

            let mut chunk_matches = Vec::new();
            for outcome in outcomes {
                match outcome {
                    ResolveOutcome::Matched(m) => chunk_matches.push(*m),
                    ResolveOutcome::Miss => missed += 1,
                    ResolveOutcome::Failed => failed += 1,
                }
            }

            tracing::info!(
                chunk = index + 1,
                total_chunks,
                chunk_matches = chunk_matches.len(),
                "Chunk completed"
            );

            on_chunk(&chunk_matches).await?;
            matches.append(&mut chunk_matches);

            if index + 1 < total_chunks && !self.config.chunk_pause.is_zero() {
                tokio::time::sleep(self.config.chunk_pause).await;
            }
        }

        let summary = BatchSummary {
            total: products.len(),
            matched: matches.len(),
            missed,
            failed,
            elapsed: started.elapsed(),
        };

        tracing::info!(
            total = summary.total,
            matched = summary.matched,
            missed = summary.missed,
            failed = summary.failed,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "Batch resolution completed"
        );

        Ok(BatchOutcome { matches, summary })
    }
}
