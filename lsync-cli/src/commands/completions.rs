//! lsync completions command.

use std::io;

use clap_complete::Shell;

use super::Result;

/// Write the completion script for `shell` to stdout.
pub fn run(shell: Shell) -> Result<()> {
    let mut cmd = crate::build_cli();
    clap_complete::generate(shell, &mut cmd, "lsync", &mut io::stdout());
    Ok(())
}
