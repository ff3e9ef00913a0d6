//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain    | Description                              |
//! |---------|-----------|------------------------------------------|
//! | 0       | Universal | Success                                  |
//! | 1       | Universal | General error (unspecified)              |
//! | 2       | Universal | CLI usage error (bad args, missing file) |
//! | 10-19   | api       | Remote annotation API codes              |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure (network, local I/O).
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// No API token configured (run `bgrid token set`).
pub const EXIT_NOT_AUTH: u8 = 10;

/// The remote API rejected the call: non-retryable HTTP status or an
/// application-level error descriptor in a 2xx body.
pub const EXIT_API: u8 = 11;

/// Rate-limit / unavailability retries exhausted (HTTP 429 or 503).
pub const EXIT_RATE_LIMIT: u8 = 12;

/// 2xx response body that did not parse as the API contract.
pub const EXIT_MALFORMED: u8 = 13;

/// Map a client error onto the registry.
pub fn client_exit_code(err: &brandgrid_client::Error) -> u8 {
    use brandgrid_client::Error;
    match err {
        Error::MissingCredential => EXIT_NOT_AUTH,
        Error::Http(429, _) | Error::Http(503, _) => EXIT_RATE_LIMIT,
        Error::Http(_, _) | Error::Api { .. } => EXIT_API,
        Error::Parse(_) => EXIT_MALFORMED,
        Error::Network(_) | Error::Io(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandgrid_client::Error;

    #[test]
    fn test_client_exit_code_mapping() {
        assert_eq!(client_exit_code(&Error::MissingCredential), EXIT_NOT_AUTH);
        assert_eq!(client_exit_code(&Error::Http(429, String::new())), EXIT_RATE_LIMIT);
        assert_eq!(client_exit_code(&Error::Http(503, String::new())), EXIT_RATE_LIMIT);
        assert_eq!(client_exit_code(&Error::Http(400, String::new())), EXIT_API);
        assert_eq!(
            client_exit_code(&Error::Api { code: "x".into(), message: "y".into() }),
            EXIT_API
        );
        assert_eq!(client_exit_code(&Error::Parse("bad".into())), EXIT_MALFORMED);
        assert_eq!(client_exit_code(&Error::Network("down".into())), EXIT_ERROR);
        assert_eq!(client_exit_code(&Error::Io("disk".into())), EXIT_ERROR);
    }
}
