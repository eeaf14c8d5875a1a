use autoflow_core::{ApiError, ErrorKind};

/// Exit codes for CI/automation.
pub const SUCCESS: i32 = 0;
pub const VALIDATION_FAILED: i32 = 2;
pub const API_ERROR: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
pub const AUTH_FAILED: i32 = 5;

pub fn for_error(err: &ApiError) -> i32 {
    match err.kind {
        ErrorKind::Validation => VALIDATION_FAILED,
        ErrorKind::Authentication | ErrorKind::Authorization => AUTH_FAILED,
        ErrorKind::Configuration => RUNTIME_ERROR,
        _ => API_ERROR,
    }
}
