//! lsync push command.

use super::{load_project, CliError, Result};
use crate::output::{Method, Output};

/// Run the push command.
pub fn run(output: &Output) -> Result<()> {
    let (paths, config) = load_project()?;
    if config.sources().is_empty() {
        output.warn("No push sources configured");
        return Ok(());
    }

    let spinner = output.spinner("Pushing files");
    let summary = lsync_core::push(paths.root(), &config);
    spinner.finish_and_clear();
    let summary = summary?;

    if output.is_json() {
        output.json(&summary)?;
    } else {
        for result in &summary.results {
            let local = paths.display_path(&result.file.path);
            match &result.error {
                Some(msg) => output.error(&format!("Error pushing {}: {}", local, msg)),
                None => {
                    output.transfer(Method::Push, &local, &result.file.locale_path());
                    if result.created_locale {
                        output.info(&format!("Created locale {}", result.file.id));
                    }
                }
            }
        }

        if !output.is_quiet() {
            output.info(&format!(
                "Summary: {} uploaded, {} locale(s) created, {} failed",
                summary.uploaded, summary.created, summary.failed
            ));
        }
    }

    if summary.failed > 0 {
        return Err(CliError::Failed(format!(
            "{} file(s) failed to push",
            summary.failed
        )));
    }

    Ok(())
}
