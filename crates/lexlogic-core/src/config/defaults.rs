//! Default values for lexlogic configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// File Locations
// ============================================================================

/// Project-local config file name.
pub const LOCAL_CONFIG_FILE: &str = "lexlogic.toml";

/// Directory under the user config dir.
pub const CONFIG_DIR_NAME: &str = "lexlogic";

/// User config file name.
pub const USER_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Backend Defaults
// ============================================================================

/// Default formalization backend URL.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";

/// Default request timeout. Generation calls wait on an LLM, so this is generous.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// Agentic Log Defaults
// ============================================================================

/// Interval between polls for new agentic log entries.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Entries requested per agentic log page.
pub const DEFAULT_LOG_PAGE_LIMIT: u32 = 20;

// ============================================================================
// Serve Defaults
// ============================================================================

/// Default port for the local viewer.
pub const DEFAULT_SERVE_PORT: u16 = 3333;

/// Whether `serve` opens a browser.
pub const DEFAULT_OPEN_BROWSER: bool = true;

// ============================================================================
// Logging Defaults
// ============================================================================

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// ============================================================================
// Environment Variables
// ============================================================================

pub const ENV_BACKEND_URL: &str = "LEXLOGIC_BACKEND_URL";
pub const ENV_TIMEOUT_SECS: &str = "LEXLOGIC_TIMEOUT_SECS";
pub const ENV_POLL_INTERVAL_SECS: &str = "LEXLOGIC_POLL_INTERVAL_SECS";
pub const ENV_LOG_LEVEL: &str = "LEXLOGIC_LOG_LEVEL";
pub const ENV_SERVE_PORT: &str = "LEXLOGIC_SERVE_PORT";
