use anyhow::Result;
use colored::Colorize;

use commit_draft_rs::{cli, config, git, hook, install, provider};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::parse();

    match cli.command {
        Some(cli::Command::Install) => {
            let path = install::install_hook()?;
            println!(
                "{} Hook installed at {}",
                "done!".green().bold(),
                path.display()
            );
        }
        None => {
            let Some(commit_msg_file) = cli.commit_msg_file else {
                anyhow::bail!(
                    "no commit message file provided (usage: {})",
                    "cdraft <commit-msg-file> [commit-type]".yellow()
                );
            };

            // A broken config file must not break the commit; fall back to
            // defaults and tell the user.
            let cfg = config::AppConfig::load().unwrap_or_else(|err| {
                eprintln!(
                    "{} failed to load config, using defaults: {:#}",
                    "warning:".yellow().bold(),
                    err
                );
                config::AppConfig::default()
            });

            let args = hook::HookArgs {
                commit_msg_file,
                commit_type: cli.commit_type.unwrap_or_default(),
            };

            let vcs = git::GitCli;
            let client = provider::HttpCompletionClient::new(&cfg.api_url, cfg.request_timeout());
            hook::run(&args, &cfg, &vcs, &client)?;
        }
    }

    Ok(())
}
