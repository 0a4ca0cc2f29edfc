//! Shared constants and invariants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const BASE_URL: &str = "http://www.areship.cn/api/svc";
pub const DEBUG_BASE_URL: &str = "http://120.77.77.237/api/svc";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_TOKEN_DURATION_HOURS: u64 = 2;
pub const DEFAULT_INVALID_TOKEN_CODE: i64 = 401;

pub const DEFAULT_AUTH_HEADER: &str = "Authorization";
pub const DEFAULT_AUTH_SCHEME: &str = "Bearer";

// transport retries: 1 call + 2 retries, 5s doubling up to 10s
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 5_000;
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 10_000;

pub const CACHE_DIR_NAME: &str = "areship";
pub const TOKEN_FILE_EXTENSION: &str = "token";
pub const TOKEN_FILE_MODE: u32 = 0o600;

// Upstream endpoints
pub const PATH_GET_TOKEN: &str = "/getToken";
pub const PATH_CREATE_ORDER: &str = "/createOrder";
pub const PATH_QUERY_ORDER: &str = "/getOrderInfo";
pub const PATH_CANCEL_ORDER: &str = "/cancelOrder";
pub const PATH_RATES: &str = "/rates";
pub const PATH_LABEL: &str = "/getLabel";
pub const PATH_USER_INFO: &str = "/getUserInfo";
pub const PATH_SCAN_FORM: &str = "/createScanForm";

pub fn user_agent() -> String {
    format!("areship-rs/{VERSION} (https://github.com/AleksandrNi/areship-rs)")
}
