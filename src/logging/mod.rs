//! Logging and observability
//!
//! Structured logging via `tracing`: console output plus an optional rolling
//! JSON file. Portal steps log `step`, `correlation_id`, `status` and
//! `cookie_count`; operations log `operation` and `therapist_id`. Passwords,
//! password hashes, cookie values and tokens are never logged.
//!
//! # Example
//!
//! ```no_run
//! use practice_bridge::logging::init_logging;
//! use practice_bridge::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of a bridge operation
///
/// # Example
///
/// ```no_run
/// use practice_bridge::log_operation_start;
///
/// log_operation_start!("fetch_note", "therapist-1");
/// ```
#[macro_export]
macro_rules! log_operation_start {
    ($operation:expr, $therapist_id:expr) => {
        tracing::info!(
            operation = $operation,
            therapist_id = %$therapist_id,
            "Starting portal operation"
        );
    };
}

/// Log the successful completion of a bridge operation
///
/// # Example
///
/// ```no_run
/// use practice_bridge::log_operation_complete;
/// use std::time::Duration;
///
/// log_operation_complete!("sync_session", Duration::from_millis(840));
/// ```
#[macro_export]
macro_rules! log_operation_complete {
    ($operation:expr, $duration:expr) => {
        tracing::info!(
            operation = $operation,
            duration_ms = $duration.as_millis() as u64,
            "Portal operation completed"
        );
    };
}

/// Log a classified bridge failure
///
/// Transport failures are warnings since another attempt may succeed; all
/// other categories are errors.
///
/// # Example
///
/// ```no_run
/// use practice_bridge::log_classified_error;
/// use practice_bridge::core::classify;
/// use practice_bridge::domain::BridgeError;
///
/// let classified = classify(&BridgeError::AuthFailure);
/// log_classified_error!(&classified, "fetch_note");
/// ```
#[macro_export]
macro_rules! log_classified_error {
    ($classified:expr, $operation:expr) => {{
        let classified: &$crate::core::ClassifiedError = $classified;
        if classified.retryable {
            tracing::warn!(
                operation = $operation,
                kind = %classified.kind,
                status = classified.status,
                error = %classified.message,
                "Portal operation failed"
            );
        } else {
            tracing::error!(
                operation = $operation,
                kind = %classified.kind,
                status = classified.status,
                error = %classified.message,
                "Portal operation failed"
            );
        }
    }};
}

#[cfg(test)]
mod tests {
    use crate::core::classify;
    use crate::domain::BridgeError;
    use std::time::Duration;

    #[test]
    fn test_macros_expand_without_subscriber() {
        log_operation_start!("check_login", "therapist-1");
        log_operation_complete!("check_login", Duration::from_millis(5));
        log_classified_error!(&classify(&BridgeError::AuthFailure), "check_login");
        log_classified_error!(
            &classify(&BridgeError::NetworkFailure("reset".into())),
            "check_login"
        );
    }
}
