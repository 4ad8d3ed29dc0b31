use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod output;
mod paths;

use output::Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Starts a new lsync project.
    /// This will create a `.lsync.toml` file in the root folder of where the user is calling the
    /// CLI from. root folder being the place where we find a `.git` folder
    Init {
        /// Project used by sources and targets that don't name their own
        #[clap(long)]
        project_id: String,
        /// Default file format, e.g. `yml` or `json`
        #[clap(long)]
        file_format: Option<String>,
        /// Directory holding the remote. Defaults to `.lsync-remote` at the project root
        #[clap(long)]
        remote: Option<PathBuf>,
    },
    /// Uploads the local files of every push source
    Push,
    /// Downloads every pull target into its local files
    Pull {
        /// Only list the files that would be written
        #[clap(long)]
        dry_run: bool,
    },
    /// Prints version and build information
    Info,
    /// Prints a shell completion script
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Parser)]
#[clap(name = "lsync", version = env!("LSYNC_VERSION"), author, about)]
pub struct Cli {
    /// Output results as JSON
    #[clap(long, global = true)]
    pub json: bool,

    /// Only print errors
    #[clap(long, short, global = true)]
    pub quiet: bool,

    /// Run as if started in this directory
    #[clap(short = 'C', global = true)]
    pub directory: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

pub fn build_cli() -> clap::Command {
    Cli::command()
}

fn try_main(cli: Cli, output: &Output) -> commands::Result<()> {
    if let Some(dir) = &cli.directory {
        paths::set_cwd(dir)?;
    }

    match cli.command {
        Command::Init {
            project_id,
            file_format,
            remote,
        } => commands::init::run(output, project_id, file_format, remote),
        Command::Push => commands::push::run(output),
        Command::Pull { dry_run } => commands::pull::run(output, dry_run),
        Command::Info => commands::info::run(output),
        Command::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };
    let output = Output::new(format, cli.quiet);

    if let Err(e) = try_main(cli, &output) {
        log::debug!("Command failed ({}): {:?}", e.error_type(), e);
        output.error(&e.to_string());
        ::std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lsync", "pull", "--dry-run", "--json", "-C", "/tmp"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.directory, Some(PathBuf::from("/tmp")));
        assert!(matches!(cli.command, Command::Pull { dry_run: true }));
    }

    #[test]
    fn init_requires_project_id() {
        assert!(Cli::try_parse_from(["lsync", "init"]).is_err());
        let cli = Cli::try_parse_from(["lsync", "init", "--project-id", "p", "--file-format", "yml"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Init { ref project_id, file_format: Some(_), remote: None } if project_id == "p"
        ));
    }
}
