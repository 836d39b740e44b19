//! Notification adapters.

mod logging;

pub use logging::LoggingNotifier;
