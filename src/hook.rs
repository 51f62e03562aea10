use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{AppConfig, API_KEY_ENV};
use crate::git::{self, VersionControlPort};
use crate::prompt::PromptBuilder;
use crate::provider::{self, CompletionPort};
use crate::sanitize::sanitize;

pub struct HookArgs {
    pub commit_msg_file: PathBuf,
    pub commit_type: String,
}

/// True when the trimmed file content is non-empty and not a comment block,
/// meaning a human or another tool already wrote a message.
pub fn message_already_present(content: &str) -> bool {
    let trimmed = content.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}

/// Generation is bypassed for any non-empty commit type (merge, squash,
/// template, amend) and whenever the file already carries a message.
pub fn should_skip(commit_type: &str, commit_msg_file: &Path) -> bool {
    if !commit_type.is_empty() {
        return true;
    }

    match std::fs::read_to_string(commit_msg_file) {
        Ok(content) => message_already_present(&content),
        Err(_) => false,
    }
}

/// Prepend the generated message above a blank-line separator, keeping the
/// existing template content intact. Written to a sibling temp file first so
/// a partial failure never corrupts the commit message file.
pub fn update_commit_message_file(message: &str, path: &Path) -> Result<()> {
    let existing = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let combined = format!("{message}\n\n{existing}");

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or(Path::new(".")))
        .context("Failed to create temporary file")?;
    tmp.write_all(combined.as_bytes())
        .context("Failed to write temporary file")?;

    // The temp file starts out 0600; keep whatever mode the commit message
    // file already had.
    let permissions = std::fs::metadata(path)
        .with_context(|| format!("Failed to stat {}", path.display()))?
        .permissions();
    tmp.as_file()
        .set_permissions(permissions)
        .context("Failed to carry permissions onto the temporary file")?;

    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

/// One hook invocation, end to end. Every stop condition past argument
/// parsing is non-fatal: the user still gets their editor with whatever was
/// in the file.
pub fn run(
    args: &HookArgs,
    cfg: &AppConfig,
    vcs: &dyn VersionControlPort,
    llm: &dyn CompletionPort,
) -> Result<()> {
    if should_skip(&args.commit_type, &args.commit_msg_file) {
        eprintln!(
            "{} a commit message is already in play, skipping generation",
            "note:".yellow().bold()
        );
        return Ok(());
    }

    let Ok(api_key) = std::env::var(API_KEY_ENV) else {
        eprintln!(
            "{} {} not set, skipping commit message generation",
            "note:".yellow().bold(),
            API_KEY_ENV.yellow()
        );
        return Ok(());
    };
    if api_key.is_empty() {
        eprintln!(
            "{} {} is empty, skipping commit message generation",
            "note:".yellow().bold(),
            API_KEY_ENV.yellow()
        );
        return Ok(());
    }

    let diff = vcs.staged_diff().unwrap_or_else(|err| {
        eprintln!(
            "{} couldn't read staged diff: {:#}",
            "warning:".yellow().bold(),
            err
        );
        String::new()
    });
    if diff.trim().is_empty() {
        eprintln!(
            "{} no staged changes, nothing to describe",
            "note:".yellow().bold()
        );
        return Ok(());
    }

    let changed_files = vcs.changed_files().unwrap_or_else(|err| {
        eprintln!(
            "{} couldn't list changed files: {:#}",
            "warning:".yellow().bold(),
            err
        );
        String::new()
    });

    let recent_commits = git::recent_author_commits(vcs);

    let builder = PromptBuilder::new(&cfg.system_prompt, cfg.max_diff_chars);
    let system_prompt = builder.system_prompt(&recent_commits);
    let user_prompt = builder.user_prompt(&changed_files, &diff);

    let Some(raw) = provider::generate(llm, cfg, &api_key, &system_prompt, &user_prompt) else {
        return Ok(());
    };

    let message = sanitize(&raw);
    if message.is_empty() {
        eprintln!(
            "{} model returned an empty message, leaving the file alone",
            "warning:".yellow().bold()
        );
        return Ok(());
    }

    if let Err(err) = update_commit_message_file(&message, &args.commit_msg_file) {
        eprintln!(
            "{} couldn't update commit message file: {:#}",
            "error:".red().bold(),
            err
        );
    }

    Ok(())
}
