//! lsync info command.

use serde::Serialize;

use super::Result;
use crate::output::Output;

#[derive(Debug, Clone, Serialize)]
pub struct ClientInfo {
    pub built_at: &'static str,
    pub version: &'static str,
    pub revision: &'static str,
    pub core_version: &'static str,
    pub target: &'static str,
}

impl ClientInfo {
    pub fn new() -> Self {
        Self {
            built_at: env!("LSYNC_BUILT_AT"),
            version: env!("LSYNC_VERSION"),
            revision: env!("LSYNC_COMMIT_SHA"),
            core_version: lsync_core::VERSION,
            target: env!("LSYNC_TARGET"),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Built at:            {}", self.built_at),
            format!("lsync version:       {}", self.version),
            format!("lsync revision:      {}", self.revision),
            format!("lsync-core version:  {}", self.core_version),
            format!("Target:              {}", self.target),
        ]
    }
}

/// Run the info command.
pub fn run(output: &Output) -> Result<()> {
    let info = ClientInfo::new();
    if output.is_json() {
        output.json(&info)?;
    } else {
        for line in info.lines() {
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_lines_are_aligned() {
        let lines = ClientInfo::new().lines();
        assert_eq!(lines.len(), 5);
        let column = lines[0].find(env!("LSYNC_BUILT_AT")).unwrap();
        assert!(lines.iter().all(|l| l.len() > column && l[..column].trim_end().ends_with(':')));
        assert!(lines[1].ends_with(env!("LSYNC_VERSION")));
    }
}
