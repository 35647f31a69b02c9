// SPDX-License-Identifier: MIT OR Apache-2.0
//! Configuration loading, validation, and merging for stratum translators.
//!
//! [`StratumConfig`] holds the log level and one optional override table per
//! protocol.  Load it from TOML, check it with [`validate_config`], then
//! build ready-to-use translators with [`Translators::from_config`].
#![deny(unsafe_code)]
#![warn(missing_docs)]

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use stratum_error::ErrorCode;
use stratum_protocol::{
    GraphQlTranslator, GrpcCode, GrpcTranslator, HttpTranslator, SoapFaultCode, SoapTranslator,
    StatusTable,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration loading or validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested configuration file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the config shape.
    #[error("failed to parse config: {reason}")]
    ParseError {
        /// Parser diagnostic.
        reason: String,
    },

    /// Semantic validation failed (one or more problems).
    #[error("config validation failed: {reasons:?}")]
    ValidationError {
        /// Individual validation failure messages.
        reasons: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

/// Advisory issues that do not prevent operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// An HTTP override maps an error code to a non-error status.
    NonErrorStatus {
        /// Error code being mapped.
        code: String,
        /// Configured status.
        status: u16,
    },
    /// An override table is present but empty, so every code falls back to
    /// its error type.
    EmptyMapping {
        /// Protocol section name.
        protocol: String,
    },
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigWarning::NonErrorStatus { code, status } => {
                write!(f, "http mapping sends '{code}' as non-error status {status}")
            }
            ConfigWarning::EmptyMapping { protocol } => {
                write!(
                    f,
                    "{protocol} mapping is empty; every code uses the type fallback"
                )
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct StratumConfig {
    /// Log level for stratum targets (e.g. `"debug"`, `"info"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// HTTP status overrides.
    #[serde(default)]
    pub http: ProtocolSection<u16>,

    /// gRPC status overrides.
    #[serde(default)]
    pub grpc: ProtocolSection<GrpcCode>,

    /// SOAP fault overrides and actor.
    #[serde(default)]
    pub soap: SoapSection,

    /// GraphQL code overrides.
    #[serde(default)]
    pub graphql: ProtocolSection<String>,
}

impl Default for StratumConfig {
    fn default() -> Self {
        Self {
            log_level: Some(DEFAULT_LOG_LEVEL.into()),
            http: ProtocolSection::default(),
            grpc: ProtocolSection::default(),
            soap: SoapSection::default(),
            graphql: ProtocolSection::default(),
        }
    }
}

/// Override table for one protocol.
///
/// `mapping = None` keeps the built-in table; `Some` replaces it, even when
/// empty.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct ProtocolSection<S> {
    /// Error code → protocol status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<BTreeMap<String, S>>,
}

impl<S> Default for ProtocolSection<S> {
    fn default() -> Self {
        Self { mapping: None }
    }
}

impl<S: Clone> ProtocolSection<S> {
    /// Override table converted for a translator, if one is configured.
    pub fn table(&self) -> Option<StatusTable<S>> {
        self.mapping.as_ref().map(to_table)
    }
}

/// SOAP section: override table plus fault actor.
#[derive(Debug, Clone, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct SoapSection {
    /// URI reported as `faultactor`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,

    /// Error code → fault code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<BTreeMap<String, SoapFaultCode>>,
}

impl SoapSection {
    /// Override table converted for a translator, if one is configured.
    pub fn table(&self) -> Option<StatusTable<SoapFaultCode>> {
        self.mapping.as_ref().map(to_table)
    }
}

fn to_table<S: Clone>(mapping: &BTreeMap<String, S>) -> StatusTable<S> {
    mapping
        .iter()
        .map(|(code, status)| (ErrorCode::new(code.as_str()), status.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const DEFAULT_LOG_LEVEL: &str = "info";

/// Recognised log levels.
const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Valid HTTP status range.
const HTTP_STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=599;

/// Statuses below this are not errors.
const FIRST_ERROR_STATUS: u16 = 400;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load a [`StratumConfig`] from an optional TOML file path.
///
/// * If `path` is `Some`, reads and parses the file.
/// * If `path` is `None`, returns [`StratumConfig::default()`].
///
/// Environment variable overrides are applied on top in both cases.
pub fn load_config(path: Option<&Path>) -> Result<StratumConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|source| {
                let path = p.display().to_string();
                if source.kind() == std::io::ErrorKind::NotFound {
                    ConfigError::FileNotFound { path, source }
                } else {
                    ConfigError::ReadError { path, source }
                }
            })?;
            debug!(target: "stratum.config", path = %p.display(), "loading config file");
            parse_toml(&content)?
        }
        None => StratumConfig::default(),
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

/// Parse a TOML string into a [`StratumConfig`].
pub fn parse_toml(content: &str) -> Result<StratumConfig, ConfigError> {
    toml::from_str::<StratumConfig>(content).map_err(|e| ConfigError::ParseError {
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Env overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides.
///
/// Recognised variables:
/// - `STRATUM_LOG_LEVEL`
/// - `STRATUM_SOAP_ACTOR`
pub fn apply_env_overrides(config: &mut StratumConfig) {
    if let Ok(val) = std::env::var("STRATUM_LOG_LEVEL") {
        config.log_level = Some(val);
    }
    if let Ok(val) = std::env::var("STRATUM_SOAP_ACTOR") {
        config.soap.actor = Some(val);
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a parsed configuration, returning advisory warnings.
///
/// Hard errors (unknown log level, out-of-range HTTP statuses, empty codes)
/// are returned as a [`ConfigError::ValidationError`]; soft issues come back
/// as warnings.
pub fn validate_config(config: &StratumConfig) -> Result<Vec<ConfigWarning>, ConfigError> {
    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<ConfigWarning> = Vec::new();

    if let Some(level) = config
        .log_level
        .as_deref()
        .filter(|level| !VALID_LOG_LEVELS.contains(level))
    {
        errors.push(format!("invalid log_level '{level}'"));
    }

    if let Some(mapping) = &config.http.mapping {
        check_keys("http", mapping, &mut errors, &mut warnings);
        for (code, &status) in mapping {
            if !HTTP_STATUS_RANGE.contains(&status) {
                errors.push(format!(
                    "http mapping '{code}': status {status} out of range (100..=599)"
                ));
            } else if status < FIRST_ERROR_STATUS {
                warnings.push(ConfigWarning::NonErrorStatus {
                    code: code.clone(),
                    status,
                });
            }
        }
    }
    if let Some(mapping) = &config.grpc.mapping {
        check_keys("grpc", mapping, &mut errors, &mut warnings);
    }
    if let Some(mapping) = &config.soap.mapping {
        check_keys("soap", mapping, &mut errors, &mut warnings);
    }
    if let Some(mapping) = &config.graphql.mapping {
        check_keys("graphql", mapping, &mut errors, &mut warnings);
        for (code, gql) in mapping {
            if gql.trim().is_empty() {
                errors.push(format!(
                    "graphql mapping '{code}': code must not be empty"
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(warnings)
    } else {
        Err(ConfigError::ValidationError { reasons: errors })
    }
}

fn check_keys<S>(
    protocol: &str,
    mapping: &BTreeMap<String, S>,
    errors: &mut Vec<String>,
    warnings: &mut Vec<ConfigWarning>,
) {
    if mapping.is_empty() {
        warnings.push(ConfigWarning::EmptyMapping {
            protocol: protocol.into(),
        });
    }
    if mapping.keys().any(|code| code.trim().is_empty()) {
        errors.push(format!("{protocol} mapping: error code must not be empty"));
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Merge two configurations.  Values in `overlay` take precedence over `base`.
///
/// Override tables are replaced whole, never combined entry by entry.
pub fn merge_configs(base: StratumConfig, overlay: StratumConfig) -> StratumConfig {
    StratumConfig {
        log_level: overlay.log_level.or(base.log_level),
        http: ProtocolSection {
            mapping: overlay.http.mapping.or(base.http.mapping),
        },
        grpc: ProtocolSection {
            mapping: overlay.grpc.mapping.or(base.grpc.mapping),
        },
        soap: SoapSection {
            actor: overlay.soap.actor.or(base.soap.actor),
            mapping: overlay.soap.mapping.or(base.soap.mapping),
        },
        graphql: ProtocolSection {
            mapping: overlay.graphql.mapping.or(base.graphql.mapping),
        },
    }
}

// ---------------------------------------------------------------------------
// Translators
// ---------------------------------------------------------------------------

/// One translator per protocol, built from a [`StratumConfig`].
#[derive(Debug, Clone, Default)]
pub struct Translators {
    /// HTTP translator.
    pub http: HttpTranslator,
    /// gRPC translator.
    pub grpc: GrpcTranslator,
    /// SOAP translator.
    pub soap: SoapTranslator,
    /// GraphQL translator.
    pub graphql: GraphQlTranslator,
}

impl Translators {
    /// Build all four translators.  Sections without a mapping keep the
    /// built-in table.
    pub fn from_config(config: &StratumConfig) -> Self {
        let http = config
            .http
            .table()
            .map_or_else(HttpTranslator::new, HttpTranslator::with_mapping);
        let grpc = config
            .grpc
            .table()
            .map_or_else(GrpcTranslator::new, GrpcTranslator::with_mapping);
        let mut soap = config
            .soap
            .table()
            .map_or_else(SoapTranslator::new, SoapTranslator::with_mapping);
        if let Some(actor) = &config.soap.actor {
            soap = soap.with_actor(actor.as_str());
        }
        let graphql = config
            .graphql
            .table()
            .map_or_else(GraphQlTranslator::new, GraphQlTranslator::with_mapping);
        Self {
            http,
            grpc,
            soap,
            graphql,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Filter enabling stratum targets at the configured level.
pub fn env_filter(config: &StratumConfig) -> EnvFilter {
    let level = config.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
    EnvFilter::new(format!("stratum={level}"))
}

/// Install a global `fmt` subscriber using [`env_filter`].
///
/// Returns `false` if a global subscriber was already set.
pub fn init_tracing(config: &StratumConfig) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .try_init()
        .is_ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
