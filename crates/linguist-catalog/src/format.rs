//! Positional placeholder interpolation for resolved templates.
//!
//! Templates use `%1`..`%99` markers, replaced by 1-based index into the
//! caller-supplied argument list. Other `%`-sequences found in the data
//! (`%s`, `%d`, a trailing `%`) come from a different formatting convention
//! embedded in human-authored strings and are opaque literal text here.
//!
//! # Invariants
//!
//! 1. **Single pass**: substitution never rescans produced output, so an
//!    argument containing `%1` is inserted verbatim, not re-expanded.
//!
//! 2. **Lossless tokenization**: reassembling the token stream of any
//!    template yields the template byte-for-byte.
//!
//! 3. **Missing arguments are not errors**: a placeholder with no matching
//!    argument is emitted literally, so partially-specified calls degrade to
//!    visibly-unfinished text instead of failing.

/// One lexed piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// A `%N` placeholder, `1..=99`, to be replaced by the argument at
    /// index `N - 1`.
    Positional(u32),
    /// A run of text emitted unchanged.
    Literal(&'a str),
}

/// Lex a template into placeholder and literal tokens.
///
/// A placeholder is `%` followed by one or two ASCII digits forming a number
/// in `1..=99` (two digits are consumed greedily, so `%10` is place ten, not
/// place one followed by `0`). Any other use of `%` stays literal.
#[must_use]
pub fn tokenize(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        // A place starts with a non-zero digit; `%0`/`%01` stay literal.
        if bytes[i] == b'%' && matches!(bytes.get(i + 1), Some(b'1'..=b'9')) {
            let digits = bytes[i + 1..]
                .iter()
                .take(2)
                .take_while(|b| b.is_ascii_digit())
                .count();
            if let Ok(place) = template[i + 1..i + 1 + digits].parse::<u32>() {
                if literal_start < i {
                    tokens.push(Token::Literal(&template[literal_start..i]));
                }
                tokens.push(Token::Positional(place));
                i += 1 + digits;
                literal_start = i;
                continue;
            }
        }
        i += 1;
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }
    tokens
}

/// Substitute positional placeholders in `template` with `args`.
///
/// `%N` takes `args[N - 1]`; a placeholder beyond the argument list is left
/// literally in place.
#[must_use]
pub fn format(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    for token in tokenize(template) {
        match token {
            Token::Literal(text) => result.push_str(text),
            Token::Positional(place) => match args.get(place as usize - 1) {
                Some(value) => result.push_str(value),
                None => {
                    result.push('%');
                    result.push_str(&place.to_string());
                }
            },
        }
    }
    result
}
