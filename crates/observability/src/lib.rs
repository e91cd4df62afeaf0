//! Tracing setup shared by the storefront binaries.

/// Initialize process-wide logging with JSON output.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    subscriber::init(subscriber::LogFormat::Json);
}

/// Subscriber configuration (filters, output format).
pub mod subscriber;

pub use subscriber::LogFormat;
