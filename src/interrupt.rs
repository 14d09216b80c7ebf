//! SIGINT handling for mid-run cancellation.
//!
//! A deploy has no state worth unwinding, so the handler writes a
//! cancellation notice with async-signal-safe calls and exits non-zero
//! wherever the run happens to be.

#[cfg(unix)]
extern "C" fn on_interrupt(_signal: libc::c_int) {
    const MSG: &[u8] = b"\ndistship: deploy cancelled\n";
    unsafe {
        libc::write(libc::STDERR_FILENO, MSG.as_ptr().cast(), MSG.len());
        libc::_exit(1);
    }
}

/// Install the SIGINT handler. Call once, before the pipeline starts.
#[cfg(unix)]
pub fn install() {
    let handler = on_interrupt as extern "C" fn(libc::c_int);
    unsafe {
        libc::signal(libc::SIGINT, handler as usize as libc::sighandler_t);
    }
}

#[cfg(not(unix))]
pub fn install() {}
