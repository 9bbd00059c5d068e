use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("QRFORGE_DEBUG").is_ok())
}

// Writes a pipeline trace line to stderr when QRFORGE_DEBUG is set
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if $crate::common::debug::debug_enabled() {
            eprintln!("[qrforge] {}", format_args!($($arg)*));
        }
    };
}

pub(crate) use debug_log;
