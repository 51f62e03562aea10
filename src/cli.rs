use clap::{Parser, Subcommand};

/// Arguments as git hands them to a `prepare-commit-msg` hook: the path to
/// the commit message file, the commit source ("message", "merge", "squash",
/// "template", "commit"), and for amends the commit object name.
#[derive(Parser, Debug)]
#[command(
    name = "cdraft",
    about = "Draft git commit messages via an LLM from a prepare-commit-msg hook",
    version,
    args_conflicts_with_subcommands = true,
    after_help = "Without a subcommand, cdraft expects the positional arguments git passes to prepare-commit-msg hooks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the commit message file being prepared
    #[arg(value_name = "COMMIT_MSG_FILE")]
    pub commit_msg_file: Option<std::path::PathBuf>,

    /// Commit source token; any non-empty value means a message already exists
    #[arg(value_name = "COMMIT_TYPE")]
    pub commit_type: Option<String>,

    /// Commit object name (passed by git on amend; unused)
    #[arg(value_name = "COMMIT_SHA", hide = true)]
    pub commit_sha: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Install cdraft as the repository's prepare-commit-msg hook
    #[command(alias = "i")]
    Install,
}

pub fn parse() -> Cli {
    Cli::parse()
}
