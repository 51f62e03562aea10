/// Composes the system and user messages sent to the completion endpoint.
/// The system template is injected configuration, not a process-wide global.
pub struct PromptBuilder {
    system_template: String,
    max_diff_chars: usize,
}

impl PromptBuilder {
    pub fn new(system_template: impl Into<String>, max_diff_chars: usize) -> Self {
        Self {
            system_template: system_template.into(),
            max_diff_chars,
        }
    }

    /// System instruction with the recent-commit sample substituted for
    /// `$RECENT_COMMITS`.
    pub fn system_prompt(&self, recent_commits: &str) -> String {
        let sample = if recent_commits.trim().is_empty() {
            "(no recent commits)"
        } else {
            recent_commits
        };
        self.system_template
            .replace("$RECENT_COMMITS", sample)
            .trim()
            .to_string()
    }

    /// User message embedding the changed-file list and the diff verbatim,
    /// subject to the hard character cutoff.
    pub fn user_prompt(&self, changed_files: &str, diff: &str) -> String {
        format!(
            "Here are the changed files:\n{}\n\nHere is the diff:\n{}",
            changed_files.trim_end(),
            truncate_diff(diff, self.max_diff_chars)
        )
    }
}

/// Hard truncation to a character budget, cut on a char boundary. A marker
/// line tells the model the diff is incomplete.
pub fn truncate_diff(diff: &str, max_chars: usize) -> String {
    if diff.chars().count() <= max_chars {
        return diff.to_string();
    }
    let truncated: String = diff.chars().take(max_chars).collect();
    format!("{truncated}\n... [diff truncated]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_diffs_pass_through_untouched() {
        assert_eq!(truncate_diff("small diff", 100), "small diff");
    }

    #[test]
    fn long_diffs_are_cut_with_a_marker() {
        let out = truncate_diff(&"x".repeat(50), 10);
        assert_eq!(out, format!("{}\n... [diff truncated]", "x".repeat(10)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let out = truncate_diff("ééééé", 3);
        assert!(out.starts_with("ééé\n"));
    }
}
