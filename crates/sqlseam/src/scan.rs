//! Generic clause scanning primitive.
//!
//! Every clause extractor in [`crate::decompose`] is one configuration of
//! the same scan: find a start keyword, capture up to the first terminator
//! keyword after it (or the end of input when none follows), strip any
//! terminator words that leaked into the captured span. The scan is
//! regex-bounded and not grammar-aware: a clause keyword sitting inside a
//! string literal terminates the span just the same. That fragility is part
//! of the contract, not a bug to fix here.

use regex::Regex;

/// A reusable start/terminator keyword scan over raw SQL text.
#[derive(Debug)]
pub struct ClauseScanner {
    start: Regex,
    terminators: Regex,
}

impl ClauseScanner {
    /// Compile a scanner from start-token and terminator-token word lists.
    ///
    /// Tokens are matched case-insensitively on word boundaries. Multi-word
    /// tokens such as `"GROUP BY"` tolerate arbitrary whitespace between
    /// their words.
    pub fn new(start_tokens: &[&str], terminator_tokens: &[&str]) -> Self {
        Self {
            start: compile(start_tokens),
            terminators: compile(terminator_tokens),
        }
    }

    /// Locate the first clause span in `sql`.
    ///
    /// Captures the text between the first start token and the first
    /// terminator token occurring after it, or up to the end of input when
    /// no terminator follows (a trailing clause has no boundary keyword).
    /// Terminator words still present in the captured span are stripped
    /// before the trimmed body is returned.
    ///
    /// Returns `None` when no start token is present, or when the captured
    /// body is blank.
    pub fn scan(&self, sql: &str) -> Option<String> {
        let start = self.start.find(sql)?;
        let rest = &sql[start.end()..];
        let body = match self.terminators.find(rest) {
            Some(term) => &rest[..term.start()],
            None => rest,
        };
        let body = self.terminators.replace_all(body, "");
        let body = body.trim();
        if body.is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    }

    /// Check whether the start token occurs anywhere in `sql`.
    pub fn has_start(&self, sql: &str) -> bool {
        self.start.is_match(sql)
    }

    /// Count occurrences of the start token in `sql`.
    pub fn start_count(&self, sql: &str) -> usize {
        self.start.find_iter(sql).count()
    }
}

/// Build a case-insensitive, word-bounded alternation over keyword phrases.
fn compile(tokens: &[&str]) -> Regex {
    let alternation = tokens
        .iter()
        .map(|token| {
            token
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(r"\s+")
        })
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))
        .expect("invalid built-in clause keyword pattern")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_basic_span() {
        let scanner = ClauseScanner::new(&["WHERE"], &["ORDER", "GROUP", "LIMIT", "OFFSET"]);
        let body = scanner.scan("SELECT * FROM t WHERE id = 1 LIMIT 5");
        assert_eq!(body.as_deref(), Some("id = 1"));
    }

    #[test]
    fn test_scan_stops_at_first_terminator() {
        let scanner = ClauseScanner::new(&["WHERE"], &["ORDER", "GROUP", "LIMIT", "OFFSET"]);
        let body = scanner.scan("SELECT * FROM t WHERE a = 1 GROUP BY a LIMIT 5");
        assert_eq!(body.as_deref(), Some("a = 1"));
    }

    #[test]
    fn test_scan_runs_to_end_without_terminator() {
        let scanner = ClauseScanner::new(&["WHERE"], &["ORDER", "GROUP", "LIMIT", "OFFSET"]);
        let body = scanner.scan("SELECT * FROM t WHERE name = 'x'");
        assert_eq!(body.as_deref(), Some("name = 'x'"));
    }

    #[test]
    fn test_scan_missing_start_token() {
        let scanner = ClauseScanner::new(&["GROUP BY"], &["HAVING", "ORDER", "LIMIT", "OFFSET"]);
        assert_eq!(scanner.scan("SELECT * FROM t WHERE id = 1"), None);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let scanner = ClauseScanner::new(&["where"], &["limit"]);
        let body = scanner.scan("select * from t WHERE id = 1 LIMIT 3");
        assert_eq!(body.as_deref(), Some("id = 1"));
    }

    #[test]
    fn test_multi_word_start_token() {
        let scanner = ClauseScanner::new(&["ORDER BY"], &["HAVING", "GROUP", "LIMIT", "OFFSET"]);
        let body = scanner.scan("SELECT * FROM t ORDER   BY id DESC LIMIT 3");
        assert_eq!(body.as_deref(), Some("id DESC"));
    }

    #[test]
    fn test_keyword_inside_identifier_is_not_a_boundary() {
        // "orders" must not match the ORDER terminator
        let scanner = ClauseScanner::new(&["FROM"], &["WHERE", "ORDER", "GROUP", "LIMIT"]);
        let body = scanner.scan("SELECT * FROM orders WHERE id = 1");
        assert_eq!(body.as_deref(), Some("orders"));
    }

    #[test]
    fn test_keyword_inside_literal_still_terminates() {
        // Documented limitation: quoted content is not protected.
        let scanner = ClauseScanner::new(&["WHERE"], &["ORDER", "GROUP", "LIMIT"]);
        let body = scanner.scan("SELECT * FROM t WHERE note = 'limit reached'");
        assert_eq!(body.as_deref(), Some("note = '"));
    }

    #[test]
    fn test_start_count() {
        let scanner = ClauseScanner::new(
            &["LEFT JOIN", "RIGHT JOIN", "INNER JOIN"],
            &["WHERE", "ORDER", "GROUP", "LIMIT", "OFFSET"],
        );
        let sql = "SELECT * FROM a LEFT JOIN b ON (x=y) INNER JOIN c ON (u=v) WHERE 1";
        assert_eq!(scanner.start_count(sql), 2);
        assert!(scanner.has_start(sql));
    }
}
