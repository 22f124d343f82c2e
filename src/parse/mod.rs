//! The `font-family` value rewriter.
//!
//! A value is split into comma-delimited entries by a small state machine that
//! understands quotes, backslash escapes, parentheses and block comments. Each
//! entry is trimmed and unquoted, looked up case-insensitively in a
//! [`Replacements`] map, and the list is joined back with `", "`.
//!
//! ```text
//!   raw value ──strip comments──▶ var(...)? ──yes──▶ rewrite inner, keep wrapper
//!                                     │no
//!                                     ▼
//!                               split entries ──▶ per entry: var(...)? / normalize + lookup
//!                                                          │
//!                                                          ▼
//!                                                    join with ", "
//! ```
//!
//! Output entries are always unquoted, whether they were replaced or not.

mod grammar;
mod tokenizer;

use crate::Replacements;

use grammar::{strip_block_comments, var_call};
use tokenizer::{normalize, split_entries};

/// `var()` calls nested deeper than this are passed through as plain entries.
const MAX_VAR_DEPTH: usize = 32;

/// How `/* ... */` comments are removed from a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentMode {
    /// Strip every comment from the whole value before splitting, including
    /// comment-like text inside quoted names.
    #[default]
    WholeValue,
    /// Only strip comments that appear outside quotes.
    QuoteAware,
}

/// Knobs for [`rewrite_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    pub comments: CommentMode,
}

/// Rewrite a `font-family` value using `replacements`.
///
/// Pure and deterministic. Empty input returns an empty string.
///
/// # Example
///
/// ```
/// use refont::{rewrite, Replacements};
///
/// let replacements = Replacements::new().with("Roboto", "Verdana");
/// assert_eq!(rewrite(r#""Roboto", 'Open Sans', serif"#, &replacements), "Verdana, Open Sans, serif");
/// assert_eq!(rewrite(r#"var(--x, "Roboto")"#, &replacements), "var(--x, Verdana)");
/// ```
#[must_use]
pub fn rewrite(value: &str, replacements: &Replacements) -> String {
    rewrite_with(value, replacements, RewriteOptions::default())
}

/// [`rewrite`] for values that may be absent. `None` is returned unchanged.
#[must_use]
pub fn rewrite_optional(value: Option<&str>, replacements: &Replacements) -> Option<String> {
    value.map(|v| rewrite(v, replacements))
}

/// [`rewrite`] with explicit options.
#[must_use]
pub fn rewrite_with(value: &str, replacements: &Replacements, options: RewriteOptions) -> String {
    if value.is_empty() {
        return String::new();
    }
    let rewriter = ListRewriter {
        replacements,
        comments: options.comments,
    };
    match options.comments {
        CommentMode::WholeValue => rewriter.list(&strip_block_comments(value), 0),
        CommentMode::QuoteAware => rewriter.list(value, 0),
    }
}

struct ListRewriter<'r> {
    replacements: &'r Replacements,
    comments: CommentMode,
}

impl ListRewriter<'_> {
    fn list(&self, value: &str, depth: usize) -> String {
        if depth < MAX_VAR_DEPTH {
            if let Some(call) = var_call(value) {
                let inner = self.list(call.inner, depth + 1);
                return call.render(&inner, depth == 0);
            }
        }
        split_entries(value, self.comments)
            .iter()
            .map(|entry| self.entry(entry, depth))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn entry(&self, raw: &str, depth: usize) -> String {
        if depth < MAX_VAR_DEPTH {
            if let Some(call) = var_call(raw) {
                let inner = self.list(call.inner, depth + 1);
                return call.render(&inner, false);
            }
        }
        let name = normalize(raw);
        match self.replacements.get(&name) {
            Some(replacement) => replacement.to_owned(),
            None => name,
        }
    }
}
