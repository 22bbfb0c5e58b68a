#![deny(missing_docs)]
//! Shared logging utilities for the pagewatch workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase,
//! a per-thread page context that prefixes every message with the id of the
//! page being checked, and a minimal test initializer for the global logger.

use std::cell::RefCell;

thread_local! {
    /// Id of the page whose check cycle is running on this thread.
    static PAGE_CONTEXT: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Returns the page id set for the current thread, if any.
pub fn page_context() -> Option<String> {
    PAGE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Marks `page_id` as the current page until the returned guard is dropped.
///
/// Guards nest: dropping one restores whatever context was active before it.
pub fn enter_page(page_id: &str) -> PageContextGuard {
    let previous = PAGE_CONTEXT.with(|ctx| ctx.replace(Some(page_id.to_string())));
    PageContextGuard { previous }
}

/// Restores the previous page context on drop.
#[must_use = "the page context is cleared as soon as the guard is dropped"]
pub struct PageContextGuard {
    previous: Option<String>,
}

impl Drop for PageContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        PAGE_CONTEXT.with(|ctx| *ctx.borrow_mut() = previous);
    }
}

/// Prefixes the message with the current page id, if one is set.
#[doc(hidden)]
#[macro_export]
macro_rules! __engine_log {
    ($level:ident, $($arg:tt)*) => {{
        match $crate::page_context() {
            Some(page) => log::$level!("[{}] {}", page, format_args!($($arg)*)),
            None => log::$level!($($arg)*),
        }
    }};
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::__engine_log!(trace, $($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::__engine_log!(info, $($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::__engine_log!(debug, $($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::__engine_log!(warn, $($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::__engine_log!(error, $($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::{enter_page, page_context};

    #[test]
    fn context_is_empty_by_default() {
        assert_eq!(page_context(), None);
    }

    #[test]
    fn nested_guards_restore_previous_page() {
        let outer = enter_page("outer");
        {
            let _inner = enter_page("inner");
            assert_eq!(page_context().as_deref(), Some("inner"));
        }
        assert_eq!(page_context().as_deref(), Some("outer"));
        drop(outer);
        assert_eq!(page_context(), None);
    }

    #[test]
    fn macros_log_with_and_without_context() {
        super::initialize_for_tests();
        engine_info!("no page yet {}", 1);
        let _guard = enter_page("docs");
        engine_debug!("inside page {}", 2);
        engine_warn!("plain");
    }
}
