//! Shared constants and invariants

// Credential fallbacks
pub const ENV_APP_KEY: &str = "BB_API_APP_KEY";
pub const ENV_CLIENT_ID: &str = "BB_API_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "BB_API_CLIENT_SECRET";

// Token lifetime is fixed by the remote service
pub const TOKEN_TTL_SECS: u64 = 600;
pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 30;
// Upper bound for configured ttl and margin (one day)
pub const MAX_TOKEN_SECS: u64 = 86_400;
pub const DEFAULT_TOKEN_SCOPE: &str = "accountability.statements";
pub const TOKEN_PATH: &str = "/oauth/token";

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 30_000;

// Wire conventions
pub const APP_KEY_PARAM: &str = "gw-dev-app-key";
pub const API_PREFIX: &str = "/accountability/v3";
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";
