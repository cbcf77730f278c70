use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use mockup_core::codec::{extension_for, SourceImage};
use mockup_core::config::MockupConfig;
use mockup_core::session::{MockupResult, Orchestrator};
use tracing::debug;

use super::options::{connect, load_source, runtime, MockupArgs};
use crate::summary;

#[derive(Args)]
pub struct GenerateArgs {
    /// Product image (PNG, JPEG or WEBP)
    pub image: PathBuf,

    #[command(flatten)]
    pub mockup: MockupArgs,

    /// Directory the mockups are written to
    #[arg(short, long, default_value = "mockups")]
    pub output: PathBuf,
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    let studio = args.mockup.load()?;
    studio.mockup.validate()?;
    let source = load_source(&args.image)?;
    let orchestrator = connect(&studio)?;

    summary::print_generate_summary(&studio, &source, &args.output);

    let results = runtime()?.block_on(run_batch(&orchestrator, &studio.mockup, &source))?;

    let written = save_results(&results, &args.output)?;
    summary::print_saved(&written);
    Ok(())
}

/// Run one batch with a progress bar driven by the session state.
pub async fn run_batch(
    orchestrator: &Orchestrator,
    config: &MockupConfig,
    source: &SourceImage,
) -> Result<Vec<MockupResult>> {
    let pb = ProgressBar::new(config.variations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Generating [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let mut rx = orchestrator.subscribe();
    let progress = {
        let pb = pb.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let ready = rx.borrow_and_update().ready_count();
                pb.set_position(ready as u64);
            }
        })
    };

    let outcome = orchestrator.start_batch(config, Some(source)).await;
    progress.abort();

    match outcome {
        Ok(results) => {
            pb.finish();
            Ok(results)
        }
        Err(err) => {
            pb.abandon();
            // The session error carries the user-facing wording.
            let message = orchestrator
                .snapshot()
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| "Batch did not complete".into());
            Err(anyhow::Error::new(err).context(message))
        }
    }
}

/// Write every result as `mockup-<n>.<ext>`, numbered in grid order.
pub fn save_results(results: &[MockupResult], dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(results.len());
    for (i, result) in results.iter().enumerate() {
        let bytes = result
            .image
            .decode()
            .with_context(|| format!("Result {} is not valid base64", result.id))?;
        let path = dir.join(format!("mockup-{}.{}", i + 1, extension_for(&bytes)));
        std::fs::write(&path, &bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(id = %result.id, path = %path.display(), "Saved mockup");
        written.push(path);
    }
    Ok(written)
}
