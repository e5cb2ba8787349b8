use std::{env, fmt::Display, num::NonZeroU32, str::FromStr, time::Duration};

use tracing::info;

/// Runtime configuration, read once at startup.
pub struct Config {
    pub bind_addr: String,
    pub jwt_secret: String,
    /// Accepted writes per identity per window.
    pub rate_limit_max: NonZeroU32,
    pub rate_limit_window: Duration,
}

impl Config {
    pub fn load() -> Self {
        Self {
            bind_addr: try_load("BIND_ADDR", "0.0.0.0:3000"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set!"),
            rate_limit_max: try_load("RATE_LIMIT_MAX", "3"),
            rate_limit_window: Duration::from_secs(try_load("RATE_LIMIT_WINDOW_SECS", "60")),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| format!("Invalid {key} value: {e}"))
        .expect("Environment misconfigured!")
}
