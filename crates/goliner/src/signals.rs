//! Interruption handling while a child process runs
//!
//! A Ctrl-C during `go build` or while the script runs would normally kill
//! goliner before it removes its workspace. While an [`InterruptGuard`] is
//! alive, SIGINT, SIGTERM and SIGHUP are instead recorded and forwarded to
//! the child being waited on, so the pipeline unwinds and cleans up.

#[cfg(unix)]
mod imp {
    use std::ffi::c_int;
    use std::sync::atomic::{AtomicI32, Ordering};

    use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
    use nix::unistd::Pid;

    const INTERCEPTED: [Signal; 3] = [Signal::SIGINT, Signal::SIGTERM, Signal::SIGHUP];

    static CHILD_PID: AtomicI32 = AtomicI32::new(0);
    static RECEIVED: AtomicI32 = AtomicI32::new(0);

    extern "C" fn forward(signum: c_int) {
        RECEIVED.store(signum, Ordering::SeqCst);
        let pid = CHILD_PID.load(Ordering::SeqCst);
        if pid > 0 {
            if let Ok(sig) = Signal::try_from(signum) {
                // kill(2) is async-signal-safe.
                let _ = signal::kill(Pid::from_raw(pid), sig);
            }
        }
    }

    pub struct InterruptGuard {
        previous: Vec<(Signal, SigAction)>,
    }

    impl InterruptGuard {
        pub fn install() -> Self {
            RECEIVED.store(0, Ordering::SeqCst);
            CHILD_PID.store(0, Ordering::SeqCst);

            let action = SigAction::new(
                SigHandler::Handler(forward),
                SaFlags::SA_RESTART,
                SigSet::empty(),
            );
            let mut previous = Vec::with_capacity(INTERCEPTED.len());
            for sig in INTERCEPTED {
                // SAFETY: the handler only touches atomics and calls kill(2).
                match unsafe { signal::sigaction(sig, &action) } {
                    Ok(old) if matches!(old.handler(), SigHandler::SigIgn) => {
                        // Ignored dispositions are inherited by the child (nohup); keep them.
                        let _ = unsafe { signal::sigaction(sig, &old) };
                    }
                    Ok(old) => previous.push((sig, old)),
                    Err(e) => tracing::warn!("cannot intercept {}: {}", sig.as_str(), e),
                }
            }
            Self { previous }
        }

        pub fn watch(&self, pid: u32) {
            CHILD_PID.store(i32::try_from(pid).unwrap_or(0), Ordering::SeqCst);
        }

        pub fn unwatch(&self) {
            CHILD_PID.store(0, Ordering::SeqCst);
        }

        pub fn received(&self) -> Option<String> {
            Signal::try_from(RECEIVED.load(Ordering::SeqCst))
                .ok()
                .map(|sig| sig.as_str().to_string())
        }
    }

    impl Drop for InterruptGuard {
        fn drop(&mut self) {
            CHILD_PID.store(0, Ordering::SeqCst);
            for (sig, old) in self.previous.drain(..) {
                // SAFETY: restores the disposition that was in place before install.
                if let Err(e) = unsafe { signal::sigaction(sig, &old) } {
                    tracing::warn!("cannot restore handler for {}: {}", sig.as_str(), e);
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    pub struct InterruptGuard;

    impl InterruptGuard {
        pub fn install() -> Self {
            InterruptGuard
        }

        pub fn watch(&self, _pid: u32) {}

        pub fn unwatch(&self) {}

        pub fn received(&self) -> Option<String> {
            None
        }
    }
}

pub use imp::InterruptGuard;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_received_after_install() {
        let guard = InterruptGuard::install();
        assert_eq!(guard.received(), None);
    }
}
