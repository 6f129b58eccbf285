//! Logging infrastructure for Quill.
//!
//! Structured logging controlled by the `QUILL_DEBUG` environment variable.
//!
//! # Environment Variables
//!
//! - `QUILL_DEBUG=true` / `QUILL_DEBUG=1` - Enable debug logging
//! - `QUILL_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `QUILL_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use quill_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```
//!
//! Inside the crate, the [`quill_debug!`](crate::quill_debug) and
//! [`quill_trace!`](crate::quill_trace) macros only emit when debug logging
//! is enabled, so assembling requests stays quiet by default.

use std::env;
use std::sync::Once;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `QUILL_DEBUG`.
///
/// Returns `true` if `QUILL_DEBUG` is set to "true", "1", or "yes" (case-insensitive).
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var("QUILL_DEBUG")
        .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false)
}

/// Get the configured log level from `QUILL_LOG_LEVEL`.
///
/// Defaults to "debug" if `QUILL_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    let fallback = if is_debug_enabled() { "debug" } else { "warn" };
    match env::var("QUILL_LOG_LEVEL") {
        Ok(level) => match level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" => "warn",
            "error" => "error",
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

/// Get the configured log format from `QUILL_LOG_FORMAT`.
///
/// Defaults to "json".
pub fn get_log_format() -> &'static str {
    env::var("QUILL_LOG_FORMAT")
        .map(|f| match f.to_lowercase().as_str() {
            "pretty" => "pretty",
            "compact" => "compact",
            _ => "json",
        })
        .unwrap_or("json")
}

/// Initialize the Quill logging system.
///
/// Subsequent calls are no-ops. Without the `tracing-subscriber` feature
/// this installs nothing, and events go to whatever subscriber the
/// application set up.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("QUILL_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!("quill={},quill_query={}", level, level))
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            match get_log_format() {
                "json" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().json())
                        .init();
                }
                "compact" => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().compact())
                        .init();
                }
                _ => {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(fmt::layer().pretty())
                        .init();
                }
            }

            tracing::info!(
                level = level,
                format = get_log_format(),
                "Quill logging initialized"
            );
        }
    });
}

/// Initialize logging with a specific level.
///
/// # Safety
///
/// This function modifies environment variables, which is unsafe in
/// multi-threaded programs. Call it at startup before spawning threads.
pub fn init_with_level(level: &str) {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        env::set_var("QUILL_LOG_LEVEL", level);
    }
    init();
}

/// Initialize debug logging; equivalent to `QUILL_DEBUG=true` plus [`init`].
///
/// # Safety
///
/// Same caveat as [`init_with_level`].
pub fn init_debug() {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        env::set_var("QUILL_DEBUG", "true");
    }
    init();
}

/// Initialize logging from the `[logging]` section of `quill.toml`.
///
/// Keys left unset keep whatever the environment says.
///
/// # Safety
///
/// Same caveat as [`init_with_level`].
pub fn init_with_config(config: &LoggingConfig) {
    // SAFETY: only called at program startup before threads are spawned.
    unsafe {
        if let Some(ref level) = config.level {
            env::set_var("QUILL_LOG_LEVEL", level);
        }
        if let Some(ref format) = config.format {
            env::set_var("QUILL_LOG_FORMAT", format);
        }
    }
    init();
}

/// Debug-level event, emitted only when `QUILL_DEBUG` is enabled.
#[macro_export]
macro_rules! quill_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

/// Trace-level event, emitted only when `QUILL_DEBUG` is enabled.
#[macro_export]
macro_rules! quill_trace {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::trace!($($arg)*);
        }
    };
}
