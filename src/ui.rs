use colored::Colorize;

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", "ℹ".blue(), msg);
}

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    println!("{} {}", "⚠".yellow(), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// Diff
// ============================================================================

/// Line diff of two texts, `-` lines from `old` and `+` lines from `new`.
///
/// Returns `None` when the texts are identical.
pub fn diff_lines(old: &str, new: &str) -> Option<Vec<(char, String)>> {
    let diff = similar::TextDiff::from_lines(old, new);
    let changes: Vec<(char, String)> = diff
        .iter_all_changes()
        .filter_map(|change| {
            let sign = match change.tag() {
                similar::ChangeTag::Delete => '-',
                similar::ChangeTag::Insert => '+',
                similar::ChangeTag::Equal => return None,
            };
            Some((sign, change.to_string_lossy().trim_end_matches('\n').to_string()))
        })
        .collect();
    (!changes.is_empty()).then_some(changes)
}

/// Print a colored line diff. Returns whether anything changed.
pub fn print_diff(old: &str, new: &str) -> bool {
    let Some(changes) = diff_lines(old, new) else {
        println!("    {}", "(no differences)".dimmed());
        return false;
    };
    for (sign, line) in changes {
        let line = format!("{sign} {line}");
        if sign == '-' {
            println!("    {}", line.red());
        } else {
            println!("    {}", line.green());
        }
    }
    true
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_identical() {
        assert_eq!(diff_lines("a\nb\n", "a\nb\n"), None);
    }

    #[test]
    fn test_diff_changed_line() {
        let changes = diff_lines("name = \"a\"\nactive = true\n", "name = \"b\"\nactive = true\n")
            .unwrap();
        assert_eq!(
            changes,
            vec![
                ('-', "name = \"a\"".to_string()),
                ('+', "name = \"b\"".to_string()),
            ]
        );
    }
}
