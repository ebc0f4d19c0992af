//! Callable-name grammar for SQL function sources.
//!
//! A function source names a schema-qualified callable, optionally preceded
//! by a marker character that requests `SELECT * FROM ...` wrapping. The
//! name itself must be one or more dot-separated segments, each a bare
//! identifier, a `[bracket]`-delimited identifier, or a `"quote"`-delimited
//! identifier. Free-form SQL fragments (statement terminators, comment
//! markers, whitespace) do not parse.

/// Marker character requesting `SELECT * FROM` wrapping of a function name.
pub const CALL_MARKER: char = '$';

/// Strip the optional leading call marker.
///
/// Returns the remaining text and whether the marker was present.
pub fn strip_call_marker(text: &str) -> (&str, bool) {
    match text.strip_prefix(CALL_MARKER) {
        Some(rest) => (rest, true),
        None => (text, false),
    }
}

/// Check a callable name against the dot-separated segment grammar.
///
/// The marker must already be stripped; a marker character anywhere in the
/// text is rejected like any other non-identifier character.
pub fn is_valid_callable_name(text: &str) -> bool {
    let mut chars = text.chars().peekable();
    loop {
        if !scan_segment(&mut chars) {
            return false;
        }
        match chars.next() {
            None => return true,
            Some('.') => continue,
            Some(_) => return false,
        }
    }
}

/// Consume one segment from the iterator, leaving the cursor on the
/// character after it. Returns false if no well-formed segment is present.
fn scan_segment(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> bool {
    match chars.peek() {
        Some('[') => scan_delimited(chars, '[', ']'),
        Some('"') => scan_delimited(chars, '"', '"'),
        Some(&c) if is_bare_start(c) => {
            chars.next();
            while chars.peek().is_some_and(|&c| is_bare_continue(c)) {
                chars.next();
            }
            true
        }
        _ => false,
    }
}

fn scan_delimited(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    open: char,
    close: char,
) -> bool {
    debug_assert_eq!(chars.peek(), Some(&open));
    chars.next();
    let mut len = 0usize;
    for c in chars.by_ref() {
        if c == close {
            return len > 0;
        }
        len += 1;
    }
    // Unterminated delimiter.
    false
}

fn is_bare_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_bare_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
