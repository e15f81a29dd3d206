//! Passphrase prompts
//!
//! Input is read with echo disabled. Ctrl-C at a prompt restores the terminal
//! and exits with status 1 before anything is written.

use crate::crypto::SecureString;
use crate::error::{DailyError, DailyResult};

use self::interrupt::InterruptGuard;

/// Prompt for a passphrase (hidden input)
pub fn prompt_passphrase(prompt: &str) -> DailyResult<SecureString> {
    let _interrupt = InterruptGuard::install();
    rpassword::prompt_password(prompt)
        .map(SecureString::from)
        .map_err(|e| DailyError::Io(format!("Failed to read passphrase: {}", e)))
}

/// Prompt for a new passphrase and its confirmation.
///
/// The pair is returned as typed; checking that they match is left to the
/// operation that consumes them.
pub fn prompt_new_passphrase() -> DailyResult<(SecureString, SecureString)> {
    let passphrase = prompt_passphrase("Enter new passphrase: ")?;
    let confirmation = prompt_passphrase("Confirm passphrase: ")?;
    Ok((passphrase, confirmation))
}

#[cfg(unix)]
mod interrupt {
    use std::fs::OpenOptions;
    use std::mem::MaybeUninit;
    use std::os::fd::{IntoRawFd, RawFd};
    use std::sync::OnceLock;

    /// Controlling terminal and its settings from before any prompt ran
    static SAVED_TERMINAL: OnceLock<Option<(RawFd, libc::termios)>> = OnceLock::new();

    /// Exit code for an interrupted prompt
    const INTERRUPTED: libc::c_int = 1;

    // Only async-signal-safe calls in here.
    extern "C" fn on_interrupt(_signal: libc::c_int) {
        if let Some(Some((fd, term))) = SAVED_TERMINAL.get() {
            unsafe {
                libc::tcsetattr(*fd, libc::TCSANOW, term);
            }
        }
        unsafe {
            libc::write(libc::STDERR_FILENO, b"\n".as_ptr().cast(), 1);
            libc::_exit(INTERRUPTED);
        }
    }

    pub(super) fn handler() -> libc::sighandler_t {
        on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t
    }

    fn capture_terminal() -> Option<(RawFd, libc::termios)> {
        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .open("/dev/tty")
            .ok()?;
        // Kept open for the life of the process so the handler can use it.
        let fd = tty.into_raw_fd();

        let mut term = MaybeUninit::<libc::termios>::uninit();
        if unsafe { libc::tcgetattr(fd, term.as_mut_ptr()) } != 0 {
            unsafe {
                libc::close(fd);
            }
            return None;
        }
        Some((fd, unsafe { term.assume_init() }))
    }

    /// Routes SIGINT to a clean exit while held; the previous disposition
    /// comes back on drop
    pub struct InterruptGuard {
        previous: libc::sighandler_t,
    }

    impl InterruptGuard {
        pub fn install() -> Self {
            SAVED_TERMINAL.get_or_init(capture_terminal);
            let previous = unsafe { libc::signal(libc::SIGINT, handler()) };
            Self { previous }
        }
    }

    impl Drop for InterruptGuard {
        fn drop(&mut self) {
            unsafe {
                libc::signal(libc::SIGINT, self.previous);
            }
        }
    }
}

#[cfg(not(unix))]
mod interrupt {
    /// Ctrl-C keeps its platform default outside Unix
    pub struct InterruptGuard;

    impl InterruptGuard {
        pub fn install() -> Self {
            Self
        }
    }
}
