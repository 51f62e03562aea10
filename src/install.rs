use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::process::Command;

/// Write an executable prepare-commit-msg wrapper into the repository's
/// hooks directory and return the installed path.
pub fn install_hook() -> Result<PathBuf> {
    let output = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .context("Failed to run git rev-parse --git-dir")?;

    if !output.status.success() {
        bail!("Not in a git repository");
    }

    let git_dir = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
    let hooks_dir = git_dir.join("hooks");
    std::fs::create_dir_all(&hooks_dir)
        .with_context(|| format!("Failed to create {}", hooks_dir.display()))?;

    let exe = std::env::current_exe().context("Failed to resolve executable path")?;
    let hook_path = hooks_dir.join("prepare-commit-msg");

    let script = format!(
        "#!/bin/sh\n# Commit message generator hook\nexec {} \"$@\"\n",
        exe.display()
    );
    std::fs::write(&hook_path, script)
        .with_context(|| format!("Failed to write {}", hook_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&hook_path, std::fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", hook_path.display()))?;
    }

    Ok(hook_path)
}
