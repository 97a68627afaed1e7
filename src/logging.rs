//! Logger setup for the binaries.
//!
//! The library only emits through the `log` facade; nothing is printed unless
//! a binary installs a backend with [`init_logger`].

use log::LevelFilter;
use std::env;

/// Environment variable that switches the default level to `Debug`.
pub const DEBUG_ENV_VAR: &str = "XWGEN_DEBUG";

/// Whether `XWGEN_DEBUG` is set to anything other than an empty string or `0`.
pub fn debug_from_env() -> bool {
    env::var(DEBUG_ENV_VAR)
        .map(|v| !v.is_empty() && v != "0")
        .unwrap_or(false)
}

/// Initialize logging for the binaries.
///
/// # Behavior
/// - Logs at `Debug` when `debug_enabled` is true, `Info` otherwise.
/// - `RUST_LOG`, if set, overrides the default filter.
/// - Calling this more than once is harmless; later calls are ignored.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    if builder.try_init().is_ok() {
        log::debug!("Logger initialized at {level:?} level");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_twice_is_harmless() {
        init_logger(false);
        init_logger(true);
        log::info!("still logging");
    }
}
