//! # Checkout Configuration
//!
//! | Variable                        | Default | Meaning                                   |
//! |---------------------------------|---------|-------------------------------------------|
//! | `CHECKOUT_POLL_INTERVAL_MS`     | 3000    | time between payment status checks        |
//! | `CHECKOUT_PAYMENT_TIMEOUT_SECS` | 300     | wall-clock limit for one payment attempt  |
//! | `CHECKOUT_MAX_ATTEMPTS`         | 20      | unresolved checks before giving up        |
//! | `CHECKOUT_ORDER_CODE_RETRIES`   | 5       | order codes to try when one is taken      |
//!
//! Call `dotenvy::dotenv()` first to pick values up from a `.env` file. Unparsable or zero
//! values are reported with a warning and replaced by the default.

use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutConfig {
    pub poll_interval: Duration,
    pub payment_timeout: Duration,
    pub max_attempts: u32,
    pub order_code_retries: u32,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(3),
            payment_timeout: Duration::from_secs(5 * 60),
            max_attempts: 20,
            order_code_retries: 5,
        }
    }
}

impl CheckoutConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |d: Duration| u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        Self {
            poll_interval: Duration::from_millis(read(
                &lookup,
                "CHECKOUT_POLL_INTERVAL_MS",
                millis(defaults.poll_interval),
            )),
            payment_timeout: Duration::from_secs(read(
                &lookup,
                "CHECKOUT_PAYMENT_TIMEOUT_SECS",
                defaults.payment_timeout.as_secs(),
            )),
            max_attempts: read(&lookup, "CHECKOUT_MAX_ATTEMPTS", defaults.max_attempts),
            order_code_retries: read(
                &lookup,
                "CHECKOUT_ORDER_CODE_RETRIES",
                defaults.order_code_retries,
            ),
        }
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + PartialEq + From<u8> + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::from(0) => value,
        _ => {
            warn!(key, value = %raw, %default, "Invalid setting, using default");
            default
        }
    }
}
