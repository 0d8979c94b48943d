//! Exit codes for CLI commands.
//!
//! The service's HTTP status decides the exit code, so scripts can tell an
//! auth failure from a rejected request without parsing output.

use crate::error::CliError;

/// Success - the service answered 200.
pub const SUCCESS: i32 = 0;

/// Usage error - invalid arguments or missing configuration.
pub const USAGE: i32 = 2;

/// Rejected - the service refused the request (4xx other than 403).
pub const REJECTED: i32 = 3;

/// Network error - no response from the service.
pub const NETWORK: i32 = 4;

/// Authentication error - invalid credentials or auth key (403).
pub const AUTH: i32 = 5;

/// Internal error - unexpected error occurred.
pub const INTERNAL: i32 = 7;

/// Server error - the service failed (5xx).
pub const SERVER: i32 = 8;

/// Map an HTTP status from the service to an exit code.
pub fn from_status(status: u16) -> i32 {
    match status {
        200 => SUCCESS,
        403 => AUTH,
        400..=499 => REJECTED,
        500..=599 => SERVER,
        _ => INTERNAL,
    }
}

/// Map an error that prevented a response to an exit code.
pub fn from_error(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<CliError>() {
        Some(CliError::Network(_)) => NETWORK,
        Some(CliError::AuthFailed(status)) => from_status(*status),
        Some(CliError::MissingCredentials | CliError::PhotoRead { .. }) => USAGE,
        _ => INTERNAL,
    }
}
