//! Logging setup shared by the binaries.

pub mod logging;

pub use logging::LogFormat;

/// Initialize process-wide logging, reading the format from `LOG_FORMAT`.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}
