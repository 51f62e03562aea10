use regex_lite::Regex;

/// Strip the wrapping quotes and markdown fences models like to add around
/// commit messages. Runs to a fixpoint, so sanitizing already-sanitized text
/// is a no-op.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.trim().to_string();
    loop {
        let next = strip_fence(&strip_wrapping_quotes(&current));
        if next == current {
            return next;
        }
        current = next;
    }
}

/// Remove a single matching pair of straight or curly quotes wrapping the
/// entire text.
fn strip_wrapping_quotes(text: &str) -> String {
    let re = Regex::new("(?s)^([\"'\u{201C}\u{2018}])(.*)([\"'\u{201D}\u{2019}])$").unwrap();
    if let Some(caps) = re.captures(text) {
        if quotes_match(&caps[1], &caps[3]) {
            return caps[2].trim().to_string();
        }
    }
    text.to_string()
}

fn quotes_match(open: &str, close: &str) -> bool {
    matches!(
        (open, close),
        ("\"", "\"") | ("'", "'") | ("\u{201C}", "\u{201D}") | ("\u{2018}", "\u{2019}")
    )
}

/// Drop a leading triple-backtick fence line and, if present, the trailing
/// bare fence. A fence with no body yields the empty string.
fn strip_fence(text: &str) -> String {
    if !text.starts_with("```") {
        return text.to_string();
    }

    let mut lines: Vec<&str> = text.lines().collect();
    if lines.len() <= 1 {
        return String::new();
    }

    lines.remove(0);
    if lines.last().map(|l| l.trim() == "```").unwrap_or(false) {
        lines.pop();
    }

    lines.join("\n").trim().to_string()
}
