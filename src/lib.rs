/// Macro for prefixed status logging to stderr (only when stderr is a terminal).
///
/// Usage:
/// ```ignore
/// log_status!("deploy", "Uploading {} to {}", archive, target);
/// log_status!("archive", "Created {} ({:.2} MB)", name, size_mb);
/// ```
#[macro_export]
macro_rules! log_status {
    ($prefix:expr, $($arg:tt)*) => {
        if ::std::io::IsTerminal::is_terminal(&::std::io::stderr()) {
            eprintln!(concat!("[", $prefix, "] {}"), format_args!($($arg)*));
        }
    };
}

pub mod core;
pub mod interrupt;
pub mod tty;
pub mod utils;

// Re-export everything from core for ergonomic library use
// Callers can write `distship::config` instead of `distship::core::config`
pub use core::*;
