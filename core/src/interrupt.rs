//! A process-wide flag the encrypt/decrypt drivers poll between major
//! steps, so an interrupted run still scrubs whatever secret buffers are
//! live at that instant instead of leaving key material in memory past
//! process exit. The CLI installs the actual signal handler; this module
//! only holds the flag both sides share.
//!
//! This is a best-effort approximation, not an async-signal-safe guarantee:
//! `Drop` only runs once control flow actually returns through one of the
//! poll points below, not the instant a signal arrives mid-syscall.

use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Called from the CLI's signal handler.
pub fn request_stop() {
	INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Polled by the encrypt/decrypt drivers between steps.
pub fn is_requested() -> bool {
	INTERRUPTED.load(Ordering::SeqCst)
}
