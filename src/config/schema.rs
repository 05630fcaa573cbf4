//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::{CompileOptions, RouteEntry, DEFAULT_MARKER};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Fragment matching behaviour.
    pub matching: MatchingConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route table, in match order.
    pub routes: Vec<RouteEntry>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            matching: MatchingConfig::default(),
            observability: ObservabilityConfig::default(),
            routes: default_routes(),
        }
    }
}

/// The demo route table served when no config file is given.
pub fn default_routes() -> Vec<RouteEntry> {
    vec![
        RouteEntry::new("", "home"),
        RouteEntry::new("red", "red"),
        RouteEntry::new("blue", "blue"),
        RouteEntry::new("colors/:color", "color"),
        RouteEntry::new("newRoute/cool/p:page/:cool", "cool"),
    ]
}

/// Fragment matching configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Character stripped from the front of every fragment.
    pub marker: char,

    /// Anchoring, wildcard width and strictness of compiled patterns.
    #[serde(flatten)]
    pub compile: CompileOptions,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER,
            compile: CompileOptions::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{CaptureMode, MatchMode};

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: RouterConfig = toml::from_str("").unwrap();
        assert_eq!(config.matching.marker, '#');
        assert_eq!(config.matching.compile, CompileOptions::default());
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.routes, default_routes());
    }

    #[test]
    fn test_routes_keep_file_order() {
        let config: RouterConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "zebra"
            handler = "z"

            [[routes]]
            handler = "home"

            [[routes]]
            pattern = "apple/:id"
            handler = "a"
            "#,
        )
        .unwrap();

        let patterns: Vec<_> = config.routes.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["zebra", "", "apple/:id"]);
    }

    #[test]
    fn test_matching_section() {
        let config: RouterConfig = toml::from_str(
            r#"
            [matching]
            marker = "!"
            match_mode = "substring"
            capture_mode = "greedy"
            strict = true

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.matching.marker, '!');
        assert_eq!(config.matching.compile.match_mode, MatchMode::Substring);
        assert_eq!(config.matching.compile.capture_mode, CaptureMode::Greedy);
        assert!(config.matching.compile.strict);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }
}
