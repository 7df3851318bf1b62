use std::path::PathBuf;
use std::sync::Arc;

use gclog::metrics::PipelineMetrics;
use gclog::runtime::{batch, boot};
use serde_json::json;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    boot::init_logging();

    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if paths.is_empty() {
        eprintln!("usage: gclog <gc-log>...");
        std::process::exit(2);
    }

    let config = boot::boot()?;
    let metrics = Arc::new(PipelineMetrics::new());
    let results = batch::analyze_files(paths.clone(), config, Arc::clone(&metrics)).await;

    let mut failed = 0;
    for (path, result) in paths.iter().zip(results) {
        let line = match result {
            Ok(run) => json!({ "file": path.display().to_string(), "summary": run.summary() }),
            Err(e) => {
                failed += 1;
                json!({ "file": path.display().to_string(), "error": e.to_string() })
            }
        };
        println!("{}", serde_json::to_string(&line)?);
    }

    info!(metrics = %serde_json::to_string(&metrics.snapshot())?, "done");
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
