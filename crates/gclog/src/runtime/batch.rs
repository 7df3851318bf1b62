//! Many files at once. Each file is independent; at most
//! `max_concurrent_files` are read at the same time.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::conf::GcLogConfig;
use crate::error::{GcLogError, Result};
use crate::metrics::PipelineMetrics;
use crate::pipeline::GcAnalyzer;
use crate::run::JvmRun;

/// Analyze every path, returning results in input order.
///
/// A failing file does not stop the others.
pub async fn analyze_files(
    paths: Vec<PathBuf>,
    config: GcLogConfig,
    metrics: Arc<PipelineMetrics>,
) -> Vec<Result<JvmRun>> {
    let permits = Arc::new(Semaphore::new(config.max_concurrent_files.max(1)));
    let analyzer = GcAnalyzer::with_metrics(config, Arc::clone(&metrics));

    let handles: Vec<JoinHandle<Result<JvmRun>>> = paths
        .into_iter()
        .map(|path| {
            let permits = Arc::clone(&permits);
            let analyzer = analyzer.clone();
            tokio::spawn(async move {
                let _permit = permits
                    .acquire_owned()
                    .await
                    .map_err(|e| GcLogError::Config(format!("batch closed: {}", e)))?;
                tokio::task::spawn_blocking(move || analyze_one(&analyzer, path))
                    .await
                    .map_err(|e| GcLogError::Io(std::io::Error::other(e)))?
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(GcLogError::Io(std::io::Error::other(e))),
        };
        metrics.record_file(result.is_ok());
        results.push(result);
    }

    let snapshot = metrics.snapshot();
    info!(
        files_ok = snapshot.files_ok,
        files_failed = snapshot.files_failed,
        events = snapshot.events,
        "batch complete"
    );
    results
}

fn analyze_one(analyzer: &GcAnalyzer, path: PathBuf) -> Result<JvmRun> {
    analyzer.analyze_file(&path).map_err(|e| {
        error!(path = %path.display(), "analysis failed: {}", e);
        e
    })
}
