#![deny(missing_docs)]
//! Logging macros shared by the mentor crates.
//!
//! Library crates never install a logger; they only emit through the
//! `mentor_*` macros. The binary picks the destination at startup and tests
//! call [`initialize_for_tests`].

use std::sync::Once;

/// Trace-level record. Used for per-request chatter.
#[macro_export]
macro_rules! mentor_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Debug-level record.
#[macro_export]
macro_rules! mentor_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Info-level record. Lifecycle of probes and submissions.
#[macro_export]
macro_rules! mentor_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Warn-level record. Backend and clipboard failures land here.
#[macro_export]
macro_rules! mentor_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error-level record.
#[macro_export]
macro_rules! mentor_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

static TEST_LOGGER: Once = Once::new();

/// Sends records to the terminal while tests run.
///
/// Every test may call this; only the first call in a process installs the
/// logger, and a logger installed elsewhere is left in place.
pub fn initialize_for_tests() {
    TEST_LOGGER.call_once(|| {
        use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

        let level = if cfg!(debug_assertions) {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_test_initialization_is_harmless() {
        super::initialize_for_tests();
        super::initialize_for_tests();
        mentor_info!("logger ready");
        assert_ne!(log::max_level(), log::LevelFilter::Off);
    }
}
