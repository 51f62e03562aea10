use anyhow::{bail, Context, Result};
use colored::Colorize;
use std::process::Command;

/// How many commits to pull from the log before filtering.
pub const RECENT_COMMIT_WINDOW: usize = 20;
/// How many substantive commit messages survive into the prompt.
pub const RECENT_COMMIT_SAMPLE: usize = 5;

/// Separator between commit messages when joined for the prompt.
pub const COMMIT_SAMPLE_SEPARATOR: &str = "\n\n---\n\n";

/// Read-only queries against the version control system. The production
/// implementation shells out to `git`; tests supply canned strings.
pub trait VersionControlPort {
    fn staged_diff(&self) -> Result<String>;
    fn changed_files(&self) -> Result<String>;
    fn current_user_email(&self) -> Result<String>;
    fn recent_commits_by_author(&self, email: &str, limit: usize) -> Result<Vec<String>>;
}

pub struct GitCli;

impl VersionControlPort for GitCli {
    fn staged_diff(&self) -> Result<String> {
        git_stdout(&["diff", "--staged"])
    }

    fn changed_files(&self) -> Result<String> {
        git_stdout(&["diff", "--staged", "--name-status"])
    }

    fn current_user_email(&self) -> Result<String> {
        let email = git_stdout(&["config", "user.email"])?;
        let email = email.trim().to_string();
        if email.is_empty() {
            bail!("git config user.email is empty");
        }
        Ok(email)
    }

    fn recent_commits_by_author(&self, email: &str, limit: usize) -> Result<Vec<String>> {
        // %x00 terminates each raw body, so commit boundaries survive
        // bodies that themselves contain blank lines.
        let output = git_stdout(&[
            "log",
            &format!("--author={email}"),
            "--pretty=format:%B%x00",
            "-n",
            &limit.to_string(),
        ])?;

        Ok(output
            .split('\0')
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .map(ToString::to_string)
            .collect())
    }
}

fn git_stdout(args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git {} failed: {stderr}", args.join(" "));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Find the git repository root directory
pub fn find_repo_root() -> Result<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .context("Failed to run git rev-parse")?;

    if !output.status.success() {
        bail!("Not in a git repository");
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Keep commit bodies that carry more than a title line, or a title plus a
/// lone sign-off trailer; newest first, at most [`RECENT_COMMIT_SAMPLE`].
pub fn sample_substantive(bodies: &[String]) -> Vec<String> {
    let mut sample = Vec::new();
    for body in bodies {
        let lines: Vec<&str> = body.trim().lines().collect();
        if lines.len() <= 1 {
            continue;
        }
        if lines.len() == 2 && lines[1].starts_with("Signed-off-by:") {
            continue;
        }
        sample.push(body.trim().to_string());
        if sample.len() >= RECENT_COMMIT_SAMPLE {
            break;
        }
    }
    sample
}

/// Recent substantive commit messages by the current author, joined for the
/// prompt. Any query failure degrades to an empty sample with a warning;
/// this never aborts the pipeline.
pub fn recent_author_commits(vcs: &dyn VersionControlPort) -> String {
    let email = match vcs.current_user_email() {
        Ok(email) => email,
        Err(err) => {
            eprintln!(
                "{} couldn't resolve author email, skipping commit history: {:#}",
                "warning:".yellow().bold(),
                err
            );
            return String::new();
        }
    };

    let bodies = match vcs.recent_commits_by_author(&email, RECENT_COMMIT_WINDOW) {
        Ok(bodies) => bodies,
        Err(err) => {
            eprintln!(
                "{} couldn't fetch recent commits, skipping commit history: {:#}",
                "warning:".yellow().bold(),
                err
            );
            return String::new();
        }
    };

    sample_substantive(&bodies).join(COMMIT_SAMPLE_SEPARATOR)
}
