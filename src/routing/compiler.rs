//! Route table compilation.
//!
//! # Responsibilities
//! - Turn each declared pattern into a regex with one capture group per parameter
//! - Preserve declaration order (first match wins at dispatch time)
//! - Leave the default (empty) pattern uncompiled
//!
//! # Design Decisions
//! - Literal text is regex-escaped; only `:name` tokens become wildcards
//! - Anchoring and wildcard width are options, not hardcoded
//! - Strict validation runs here so broken tables fail at startup, never at dispatch

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::routing::error::RouteError;
use crate::routing::pattern::{parse_pattern, validate_pattern, PatternToken};

/// One declared route: a pattern and the name of the handler it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteEntry {
    /// Route pattern; the empty string is the default (home) route.
    #[serde(default)]
    pub pattern: String,

    /// Name of a handler in the [`HandlerRegistry`](crate::handlers::HandlerRegistry).
    pub handler: String,
}

impl RouteEntry {
    pub fn new(pattern: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            handler: handler.into(),
        }
    }

    /// True for the empty pattern.
    pub fn is_default(&self) -> bool {
        self.pattern.is_empty()
    }
}

/// Where a compiled pattern is allowed to match inside a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The whole fragment must match the pattern.
    #[default]
    Anchored,
    /// The pattern may match anywhere inside the fragment.
    Substring,
}

/// What a parameter wildcard is allowed to capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    /// Zero or more characters other than whitespace and `/`.
    #[default]
    Segment,
    /// Zero or more non-whitespace characters; may span segments.
    Greedy,
}

impl CaptureMode {
    fn wildcard(self) -> &'static str {
        match self {
            CaptureMode::Segment => r"([^\s/]*)",
            CaptureMode::Greedy => r"(\S*)",
        }
    }
}

/// Options controlling how patterns are compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CompileOptions {
    pub match_mode: MatchMode,
    pub capture_mode: CaptureMode,
    /// Reject malformed patterns instead of treating them as literals.
    pub strict: bool,
}

/// Matchable form of a non-empty pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    regex: Regex,
    param_names: Vec<String>,
}

impl CompiledPattern {
    /// Captured parameter values in left-to-right order, or `None` when the
    /// fragment does not match.
    pub fn captures(&self, fragment: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(fragment)?;
        Some(
            caps.iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect(),
        )
    }

    pub fn is_match(&self, fragment: &str) -> bool {
        self.regex.is_match(fragment)
    }

    /// Regex source, for diagnostics.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}

/// A route after compilation.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pub pattern: String,
    pub handler_name: String,
    /// `None` only for the default route, which is resolved without matching.
    pub matcher: Option<CompiledPattern>,
}

impl CompiledRoute {
    pub fn is_default(&self) -> bool {
        self.matcher.is_none()
    }
}

/// Compile a single non-empty pattern.
pub fn compile_pattern(pattern: &str, options: &CompileOptions) -> Result<CompiledPattern, RouteError> {
    if options.strict {
        validate_pattern(pattern)?;
    }

    let tokens = parse_pattern(pattern);
    let mut source = String::with_capacity(pattern.len() + 16);
    let mut param_names = Vec::new();

    if options.match_mode == MatchMode::Anchored {
        source.push('^');
    }
    for token in tokens {
        match token {
            PatternToken::Literal(text) => source.push_str(&regex::escape(&text)),
            PatternToken::Param { name } => {
                source.push_str(options.capture_mode.wildcard());
                param_names.push(name);
            }
        }
    }
    if options.match_mode == MatchMode::Anchored {
        source.push('$');
    }

    let regex = Regex::new(&source).map_err(|e| RouteError::malformed(pattern, e.to_string()))?;
    Ok(CompiledPattern { regex, param_names })
}

/// Compile a route table, preserving declaration order.
///
/// Every entry yields exactly one [`CompiledRoute`]. The empty pattern is kept
/// with no matcher.
pub fn compile(routes: &[RouteEntry], options: &CompileOptions) -> Result<Vec<CompiledRoute>, RouteError> {
    routes
        .iter()
        .map(|entry| -> Result<CompiledRoute, RouteError> {
            let matcher = if entry.is_default() {
                None
            } else {
                Some(compile_pattern(&entry.pattern, options)?)
            };

            debug!(
                pattern = %entry.pattern,
                handler = %entry.handler,
                regex = matcher.as_ref().map(CompiledPattern::as_str).unwrap_or("<default>"),
                "Compiled route"
            );

            Ok(CompiledRoute {
                pattern: entry.pattern.clone(),
                handler_name: entry.handler.clone(),
                matcher,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored() -> CompileOptions {
        CompileOptions::default()
    }

    fn compat() -> CompileOptions {
        CompileOptions {
            match_mode: MatchMode::Substring,
            capture_mode: CaptureMode::Greedy,
            strict: false,
        }
    }

    #[test]
    fn test_literal_pattern_is_escaped() {
        let p = compile_pattern("a.b", &anchored()).unwrap();
        assert!(p.is_match("a.b"));
        assert!(!p.is_match("axb"));
        assert_eq!(p.captures("a.b"), Some(vec![]));
    }

    #[test]
    fn test_param_capture() {
        let p = compile_pattern("colors/:color", &anchored()).unwrap();
        assert_eq!(p.captures("colors/red"), Some(vec!["red".to_string()]));
        assert_eq!(p.param_names().to_vec(), vec!["color".to_string()]);
    }

    #[test]
    fn test_prefixed_params() {
        let p = compile_pattern("newRoute/cool/p:page/:cool", &anchored()).unwrap();
        assert_eq!(
            p.captures("newRoute/cool/p3/yes"),
            Some(vec!["3".to_string(), "yes".to_string()])
        );
    }

    #[test]
    fn test_wildcard_matches_empty() {
        let p = compile_pattern("colors/:color", &anchored()).unwrap();
        assert_eq!(p.captures("colors/"), Some(vec![String::new()]));
    }

    #[test]
    fn test_anchored_rejects_partial_match() {
        let p = compile_pattern("red", &anchored()).unwrap();
        assert!(!p.is_match("reddish"));
        assert!(!p.is_match("bored"));
    }

    #[test]
    fn test_substring_allows_partial_match() {
        let p = compile_pattern("red", &compat()).unwrap();
        assert!(p.is_match("reddish"));
        assert!(p.is_match("bored"));
    }

    #[test]
    fn test_segment_capture_stops_at_slash() {
        let p = compile_pattern("colors/:color", &anchored()).unwrap();
        assert_eq!(p.captures("colors/red/extra"), None);
    }

    #[test]
    fn test_greedy_capture_spans_segments() {
        let p = compile_pattern("colors/:color", &compat()).unwrap();
        assert_eq!(p.captures("colors/red/extra"), Some(vec!["red/extra".to_string()]));
    }

    #[test]
    fn test_whitespace_never_captured() {
        let p = compile_pattern("colors/:color", &anchored()).unwrap();
        assert!(!p.is_match("colors/dark red"));
    }

    #[test]
    fn test_strict_rejects_malformed() {
        let opts = CompileOptions {
            strict: true,
            ..CompileOptions::default()
        };
        assert!(matches!(
            compile_pattern("colors/:", &opts),
            Err(RouteError::MalformedPattern { .. })
        ));
        // Lenient mode keeps the ':' literal.
        let p = compile_pattern("colors/:", &anchored()).unwrap();
        assert!(p.is_match("colors/:"));
    }

    #[test]
    fn test_compile_preserves_order_and_default() {
        let routes = vec![
            RouteEntry::new("", "home"),
            RouteEntry::new("red", "red"),
            RouteEntry::new("colors/:color", "color"),
        ];
        let compiled = compile(&routes, &anchored()).unwrap();
        assert_eq!(compiled.len(), routes.len());
        assert!(compiled[0].is_default());
        let order: Vec<_> = compiled.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(order, vec!["", "red", "colors/:color"]);
    }

    #[test]
    fn test_options_deserialize() {
        let opts: CompileOptions = toml::from_str(
            r#"
            match_mode = "substring"
            capture_mode = "greedy"
            "#,
        )
        .unwrap();
        assert_eq!(opts, compat());
    }
}
