//! Bounded retry with exponential backoff.

use std::thread;
use std::time::Duration;

use litnet_core::cancel::CancelToken;
use litnet_core::errors::{LitNetError, LitNetResult, ServiceError};

/// Run `op` up to `max_attempts` times, doubling the delay between
/// attempts.
///
/// Only transient `Provider` errors retry. A timeout already consumed the
/// full request budget and surfaces immediately; cancellation aborts
/// before the next attempt starts. Exhaustion maps to `RetriesExhausted`
/// carrying the last failure.
pub fn retry_with_backoff<T>(
    provider: &str,
    max_attempts: u32,
    base_delay: Duration,
    cancel: &CancelToken,
    mut op: impl FnMut() -> LitNetResult<T>,
) -> LitNetResult<T> {
    let attempts = max_attempts.max(1);
    let mut delay = base_delay;
    let mut last_error = String::new();

    for attempt in 1..=attempts {
        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled {
                provider: provider.to_string(),
            }
            .into());
        }
        match op() {
            Ok(value) => return Ok(value),
            Err(LitNetError::Service(ServiceError::Provider { reason, .. })) => {
                tracing::warn!(provider, attempt, error = %reason, "provider call failed");
                last_error = reason;
                if attempt < attempts {
                    thread::sleep(delay);
                    delay *= 2;
                }
            }
            Err(other) => return Err(other),
        }
    }

    Err(ServiceError::RetriesExhausted {
        provider: provider.to_string(),
        attempts,
        last_error,
    }
    .into())
}
