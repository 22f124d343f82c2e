use std::borrow::Cow;

use winnow::ascii::{multispace0, Caseless};
use winnow::combinator::{delimited, eof};
use winnow::error::{ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::stream::Stream;
use winnow::token::take_until;

// -- Comments ---------------------------------------------------------------

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// `/* ... */` on a single line, shortest match.
pub(crate) fn block_comment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    delimited("/*", take_until(0.., "*/"), "*/")
        .verify(|body: &str| !body.contains(is_line_terminator))
        .parse_next(input)
}

/// Remove every block comment from `value`, ignoring quotes.
pub(crate) fn strip_block_comments(value: &str) -> Cow<'_, str> {
    if !value.contains("/*") {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        let mut candidate = &rest[start..];
        if block_comment(&mut candidate).is_ok() {
            rest = candidate;
        } else {
            out.push('/');
            rest = &rest[start + 1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

// -- var() ------------------------------------------------------------------

/// A value consisting of exactly one `var(...)` call.
///
/// ```text
///   "  var(  --x, Roboto  )  "
///    ^^ leading
///         ^^ open_ws
///           ^^^^^^^^^^^ inner
///                      ^^ close_ws
///                          ^^ trailing
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct VarCall<'a> {
    pub(crate) leading: &'a str,
    pub(crate) keyword: &'a str,
    pub(crate) open_ws: &'a str,
    pub(crate) inner: &'a str,
    pub(crate) close_ws: &'a str,
    pub(crate) trailing: &'a str,
}

impl VarCall<'_> {
    /// Reassemble the call around a rewritten inner list.
    pub(crate) fn render(&self, inner: &str, keep_outer_ws: bool) -> String {
        let mut out = String::with_capacity(inner.len() + 8);
        if keep_outer_ws {
            out.push_str(self.leading);
        }
        out.push_str(self.keyword);
        out.push('(');
        out.push_str(self.open_ws);
        out.push_str(inner);
        out.push_str(self.close_ws);
        out.push(')');
        if keep_outer_ws {
            out.push_str(self.trailing);
        }
        out
    }
}

/// Everything up to (not including) the `)` that closes an already opened
/// parenthesis. Quotes and backslash escapes are honoured.
fn balanced_body<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    let mut depth = 0_usize;
    let mut quote: Option<char> = None;
    let mut escape_next = false;
    let scan: &'i str = *input;

    for (offset, ch) in scan.char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match (ch, quote) {
            ('\\', _) => escape_next = true,
            (q, Some(open)) if q == open => quote = None,
            (_, Some(_)) => {}
            ('"' | '\'', None) => quote = Some(ch),
            ('(', None) => depth += 1,
            (')', None) if depth == 0 => return Ok(input.next_slice(offset)),
            (')', None) => depth -= 1,
            _ => {}
        }
    }
    Err(ErrMode::from_input(input))
}

fn var_call_parts<'i>(input: &mut &'i str) -> ModalResult<VarCall<'i>> {
    let leading = multispace0.parse_next(input)?;
    let keyword = Caseless("var").parse_next(input)?;
    '('.parse_next(input)?;
    let body = balanced_body.parse_next(input)?;
    ')'.parse_next(input)?;
    let trailing = multispace0.parse_next(input)?;
    eof.parse_next(input)?;

    let inner = body.trim_matches(|c: char| c.is_ascii_whitespace());
    let open_len = body.len() - body.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
    let open_ws = &body[..open_len];
    let close_ws = &body[open_len + inner.len()..];

    Ok(VarCall {
        leading,
        keyword,
        open_ws,
        inner,
        close_ws,
        trailing,
    })
}

/// Recognize a value that is a single `var(...)` call from start to end.
pub(crate) fn var_call(value: &str) -> Option<VarCall<'_>> {
    let mut input = value;
    var_call_parts(&mut input).ok()
}
