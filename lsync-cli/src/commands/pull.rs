//! lsync pull command.

use super::{load_project, CliError, Result};
use crate::output::{Method, Output};

/// Run the pull command.
pub fn run(output: &Output, dry_run: bool) -> Result<()> {
    let (paths, config) = load_project()?;
    if config.targets().is_empty() {
        output.warn("No pull targets configured");
        return Ok(());
    }

    let spinner = output.spinner("Pulling files");
    let summary = lsync_core::pull(paths.root(), &config, dry_run);
    spinner.finish_and_clear();
    let summary = summary?;

    if output.is_json() {
        output.json(&summary)?;
    } else {
        for result in &summary.results {
            let local = paths.display_path(&result.locale_path.path);
            match &result.error {
                Some(msg) => output.error(&format!("Error pulling {}: {}", local, msg)),
                None => output.transfer(Method::Pull, &local, &result.locale_path),
            }
        }

        if !output.is_quiet() {
            if dry_run {
                output.info(&format!("Dry run: {} file(s) would be written", summary.planned));
            } else {
                output.info(&format!(
                    "Summary: {} downloaded, {} failed",
                    summary.downloaded, summary.failed
                ));
            }
        }
    }

    if summary.failed > 0 {
        return Err(CliError::Failed(format!(
            "{} file(s) failed to pull",
            summary.failed
        )));
    }

    Ok(())
}
