//! Route pattern tokenizer.
//!
//! A pattern is a `/`-separated string in which `:name` introduces a
//! parameter. A parameter may carry a literal prefix inside its segment
//! (`p:page`), so tokenizing works on characters rather than segments:
//!
//! ```text
//! "newRoute/cool/p:page/:cool"
//!     → Literal("newRoute/cool/p"), Param("page"), Literal("/"), Param("cool")
//! ```
//!
//! A `:` not followed by a word character stays literal. Strict validation
//! ([`validate_pattern`]) turns that case into an error instead.

use crate::routing::error::RouteError;

/// One token of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternToken {
    /// Text matched verbatim.
    Literal(String),
    /// Named placeholder bound to a captured value at match time.
    Param { name: String },
}

/// Parameter names are ASCII word characters.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Split a pattern into literal and parameter tokens.
///
/// Adjacent literal characters are merged into a single token, so a pattern
/// without parameters yields at most one token.
pub fn parse_pattern(pattern: &str) -> Vec<PatternToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices();

    while let Some((idx, c)) = chars.next() {
        if c != ':' {
            literal.push(c);
            continue;
        }

        let rest = &pattern[idx + 1..];
        let name_len = rest
            .char_indices()
            .find(|(_, ch)| !is_word_char(*ch))
            .map(|(i, _)| i)
            .unwrap_or(rest.len());

        if name_len == 0 {
            // Dangling ':' is literal text.
            literal.push(c);
            continue;
        }

        if !literal.is_empty() {
            tokens.push(PatternToken::Literal(std::mem::take(&mut literal)));
        }
        tokens.push(PatternToken::Param {
            name: rest[..name_len].to_string(),
        });

        // Name characters are ASCII, so byte length equals char count.
        for _ in 0..name_len {
            chars.next();
        }
    }

    if !literal.is_empty() {
        tokens.push(PatternToken::Literal(literal));
    }
    tokens
}

/// Parameter names of a pattern, in left-to-right order.
pub fn param_names(pattern: &str) -> Vec<String> {
    parse_pattern(pattern)
        .into_iter()
        .filter_map(|token| match token {
            PatternToken::Param { name } => Some(name),
            PatternToken::Literal(_) => None,
        })
        .collect()
}

/// Strict pattern validation, run at compile time.
///
/// Rejects:
/// - whitespace (fragments never match it through a wildcard)
/// - a `:` that does not introduce a parameter name
/// - empty segments (`a//b`, a leading or trailing `/`)
///
/// The empty pattern is always valid; it designates the default route.
pub fn validate_pattern(pattern: &str) -> Result<(), RouteError> {
    if pattern.is_empty() {
        return Ok(());
    }

    if pattern.chars().any(char::is_whitespace) {
        return Err(RouteError::malformed(pattern, "pattern contains whitespace"));
    }

    for (idx, c) in pattern.char_indices() {
        if c == ':' && !pattern[idx + 1..].starts_with(is_word_char) {
            return Err(RouteError::malformed(
                pattern,
                format!("':' at byte {idx} is not followed by a parameter name"),
            ));
        }
    }

    if pattern.split('/').any(str::is_empty) {
        return Err(RouteError::malformed(pattern, "pattern contains an empty segment"));
    }

    Ok(())
}
