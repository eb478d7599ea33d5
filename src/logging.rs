// ABOUTME: Logging configuration and structured logging setup for the pipeline and CLI
// ABOUTME: Builds a tracing registry with an env filter and a json, pretty, or compact layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration
//!
//! Every request runs inside a `pipeline` span carrying its `request_id`, so
//! stage-level events can be correlated in json output.

use std::env;
use std::io;

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Service name reported at startup
pub const SERVICE_NAME: &str = "hansik-fit";

/// Logging configuration
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines for production
    Json,
    /// Human-readable multi-line output
    Pretty,
    /// Single-line output for terminals
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, defaulting to `Pretty`
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map_or(LogFormat::Pretty, |value| LogFormat::from_str_or_default(&value));
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            environment,
        }
    }

    /// Quiet CLI logging: warnings only, compact, regardless of `RUST_LOG`
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Compact,
            ..Self::default()
        }
    }

    /// Filter built from the configured level plus dependency noise reduction
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        let quiet = |directive: &str, fallback: Level| -> Directive {
            directive.parse().unwrap_or_else(|_| fallback.into())
        };
        EnvFilter::new(&self.level)
            .add_directive(quiet("hyper=warn", Level::WARN))
            .add_directive(quiet("reqwest=warn", Level::WARN))
            .add_directive(quiet("sqlx=warn", Level::WARN))
            .add_directive(quiet("sqlx::query=warn", Level::WARN))
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();
                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);
                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);
                registry.with(compact_layer).try_init()?;
            }
        }

        info!(
            service.name = SERVICE_NAME,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}
