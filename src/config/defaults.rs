//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Configuration
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "COMPLAINT_OPS_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "complaint_ops.toml";

// ============================================================================
// HTTP Server
// ============================================================================

/// Default bind address for the API server.
pub const SERVER_ADDR: &str = "0.0.0.0:8080";

/// Environment override for the bind address.
pub const SERVER_ADDR_ENV: &str = "COMPLAINT_OPS_SERVER_ADDR";

/// Comma-separated list of allowed CORS origins. Unset = any origin.
pub const CORS_ORIGINS_ENV: &str = "COMPLAINT_OPS_CORS_ORIGINS";

// ============================================================================
// AI Service
// ============================================================================

/// Default base URL of the AI service hosting the four stages.
pub const AI_SERVICE_URL: &str = "http://localhost:8000";

/// Environment override for the AI service base URL.
pub const AI_SERVICE_URL_ENV: &str = "AI_SERVICE_URL";

// ============================================================================
// Storage
// ============================================================================

/// Default data directory holding the sled database.
pub const DATA_DIR: &str = "./data";

/// Database directory name under the data directory.
pub const COMPLAINTS_DB: &str = "complaints.db";

/// sled tree holding complaint records.
pub const COMPLAINTS_TREE: &str = "complaints";
