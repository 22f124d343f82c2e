use super::grammar::block_comment;
use super::CommentMode;

/// Character-level state while splitting a font-family list on commas.
#[derive(Debug, Default)]
struct Scanner {
    /// Opening quote character while inside a quoted string.
    quote: Option<char>,
    /// Parenthesis nesting, only tracked outside quotes.
    depth: usize,
    escape_next: bool,
    current: String,
    entries: Vec<String>,
}

impl Scanner {
    fn push(&mut self, ch: char) {
        if self.escape_next {
            self.escape_next = false;
            self.current.push(ch);
            return;
        }
        match ch {
            '\\' => {
                self.escape_next = true;
                self.current.push(ch);
            }
            '"' | '\'' if self.depth == 0 => {
                match self.quote {
                    None => self.quote = Some(ch),
                    Some(open) if open == ch => self.quote = None,
                    Some(_) => {}
                }
                self.current.push(ch);
            }
            '(' if self.quote.is_none() => {
                self.depth += 1;
                self.current.push(ch);
            }
            ')' if self.quote.is_none() => {
                self.depth = self.depth.saturating_sub(1);
                self.current.push(ch);
            }
            ',' if self.quote.is_none() && self.depth == 0 => self.flush(),
            _ => self.current.push(ch),
        }
    }

    fn in_comment_position(&self) -> bool {
        !self.escape_next && self.quote.is_none()
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.entries.push(std::mem::take(&mut self.current));
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.flush();
        self.entries
    }
}

/// Split a font-family list into its raw comma-delimited entries.
///
/// A comma only separates entries outside quotes and at parenthesis depth
/// zero. A backslash and the character after it are always kept verbatim.
/// Unterminated quotes or parentheses are not errors: whatever was collected
/// becomes the last entry.
pub(crate) fn split_entries(value: &str, comments: CommentMode) -> Vec<String> {
    let mut scanner = Scanner::default();
    let mut rest = value;

    while let Some(ch) = rest.chars().next() {
        if comments == CommentMode::QuoteAware
            && scanner.in_comment_position()
            && rest.starts_with("/*")
        {
            let mut candidate = rest;
            if block_comment(&mut candidate).is_ok() {
                rest = candidate;
                continue;
            }
        }
        scanner.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    scanner.finish()
}

/// Trim an entry and drop one layer of matching quotes, unescaping the quote
/// character inside.
pub(crate) fn normalize(entry: &str) -> String {
    let trimmed = entry.trim();
    for quote in ['"', '\''] {
        if trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            // A lone quote is both the opening and the closing one.
            let inner = trimmed.get(1..trimmed.len() - 1).unwrap_or("");
            let escaped = format!("\\{quote}");
            return inner.replace(&escaped, &quote.to_string());
        }
    }
    trimmed.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(value: &str) -> Vec<String> {
        split_entries(value, CommentMode::WholeValue)
    }

    #[test]
    fn splits_on_top_level_commas() {
        assert_eq!(split("Arial, Helvetica,sans-serif"), vec!["Arial", " Helvetica", "sans-serif"]);
    }

    #[test]
    fn comma_inside_quotes_is_data() {
        assert_eq!(split(r#""A, B", Times"#), vec![r#""A, B""#, " Times"]);
        assert_eq!(split("'A, B',C"), vec!["'A, B'", "C"]);
    }

    #[test]
    fn other_quote_kind_does_not_close() {
        assert_eq!(split(r#""it's, fine", X"#), vec![r#""it's, fine""#, " X"]);
    }

    #[test]
    fn comma_inside_parentheses_is_data() {
        assert_eq!(split("local(a, b), Arial"), vec!["local(a, b)", " Arial"]);
        assert_eq!(split("f(g(a, b), c), d"), vec!["f(g(a, b), c)", " d"]);
    }

    #[test]
    fn parenthesis_inside_quotes_is_data() {
        assert_eq!(split(r#""a(b", c"#), vec![r#""a(b""#, " c"]);
    }

    #[test]
    fn escaped_comma_does_not_split() {
        assert_eq!(split(r"Foo\, Bar, Baz"), vec![r"Foo\, Bar", " Baz"]);
    }

    #[test]
    fn escaped_quote_does_not_close() {
        assert_eq!(split(r#""Seg\"oe UI", Arial"#), vec![r#""Seg\"oe UI""#, " Arial"]);
    }

    #[test]
    fn trailing_comma_adds_nothing() {
        assert_eq!(split("Arial,"), vec!["Arial"]);
        assert_eq!(split(",,Arial"), vec!["Arial"]);
    }

    #[test]
    fn unterminated_delimiters_flush() {
        assert_eq!(split(r#"Arial, "Open Sans"#), vec!["Arial", r#" "Open Sans"#]);
        assert_eq!(split("Arial, local(x, y"), vec!["Arial", " local(x, y"]);
    }

    #[test]
    fn stray_close_paren_does_not_underflow() {
        assert_eq!(split("a), b"), vec!["a)", " b"]);
    }

    #[test]
    fn quote_aware_comments_skip_outside_quotes() {
        let entries = split_entries(r#"Arial /* x, y */, "A/*b*/c""#, CommentMode::QuoteAware);
        assert_eq!(entries, vec!["Arial ", r#" "A/*b*/c""#]);
    }

    #[test]
    fn whole_value_mode_keeps_comment_text() {
        // Stripping happens before splitting in this mode.
        assert_eq!(split("A /* x, y */"), vec!["A /* x", " y */"]);
    }

    #[test]
    fn normalize_trims_and_unquotes() {
        assert_eq!(normalize("  Arial  "), "Arial");
        assert_eq!(normalize(r#" "Segoe UI" "#), "Segoe UI");
        assert_eq!(normalize("'Open Sans'"), "Open Sans");
    }

    #[test]
    fn normalize_unescapes_matching_quote_once() {
        assert_eq!(normalize(r#""Seg\"oe UI""#), r#"Seg"oe UI"#);
        assert_eq!(normalize(r"'It\'s'"), "It's");
        assert_eq!(normalize(r#""a\\"b""#), r#"a\"b"#);
    }

    #[test]
    fn normalize_leaves_mismatched_quotes() {
        assert_eq!(normalize(r#""Arial'"#), r#""Arial'"#);
        assert_eq!(normalize("'Arial"), "'Arial");
    }

    #[test]
    fn normalize_empty_quotes() {
        assert_eq!(normalize(r#""""#), "");
        assert_eq!(normalize(r#" " "#), "");
        assert_eq!(normalize("'"), "");
        assert_eq!(normalize("  "), "");
    }
}
