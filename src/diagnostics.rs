//! Stderr diagnostics that stay out of the way of the TUI.
//!
//! While the TUI owns the terminal, messages are held back and flushed once
//! it has been restored. Debug lines only appear with `--verbose`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

static HELD: Mutex<Option<Vec<String>>> = Mutex::new(None);
static VERBOSE: AtomicBool = AtomicBool::new(false);

fn held() -> MutexGuard<'static, Option<Vec<String>>> {
    // A panic while holding the lock leaves plain strings behind; keep using them
    HELD.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Start holding messages back.
pub fn hold() {
    *held() = Some(Vec::new());
}

/// Stop holding messages back and return what was collected.
pub fn release() -> Vec<String> {
    held().take().unwrap_or_default()
}

/// Emit a message now, or queue it while held.
pub fn emit(msg: String) {
    let mut guard = held();
    match guard.as_mut() {
        Some(queue) => queue.push(msg),
        None => {
            drop(guard);
            eprintln!("{}", msg);
        }
    }
}

/// Like [`emit`], but only with `--verbose`.
pub fn debug(msg: String) {
    if is_verbose() {
        emit(msg);
    }
}

/// `eprintln!` that respects held output.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::diagnostics::emit(format!($($arg)*))
    };
}

/// Verbose-only `buffered_eprintln!`.
#[macro_export]
macro_rules! debug_eprintln {
    ($($arg:tt)*) => {
        $crate::diagnostics::debug(format!($($arg)*))
    };
}
