//! Wall-Clock Timing
//!
//! `std::time::Instant` is monotonic and backed by the highest-resolution
//! clock the platform offers (`clock_gettime(CLOCK_MONOTONIC)` on Linux).

use std::time::{Duration, Instant};

/// Timer around a single measured call
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Elapsed time since `start`
    #[inline(always)]
    pub fn stop(&self) -> Duration {
        self.start.elapsed()
    }
}

/// Convert a duration to fractional milliseconds
pub fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1_000.0
}

/// Set CPU affinity to pin the current thread to a specific core
///
/// Keeps all trials on one core so migrations do not show up as latency.
/// CPU indices that do not fit in a `cpu_set_t` are rejected with
/// [`std::io::ErrorKind::InvalidInput`].
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    if cpu >= libc::CPU_SETSIZE as usize {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("CPU index {} exceeds CPU_SETSIZE ({})", cpu, libc::CPU_SETSIZE),
        ));
    }

    // SAFETY: `cpu_set_t` is plain data and valid when zeroed; the CPU_* macros
    // only touch the set we own, and sched_setaffinity(0, ..) targets the
    // calling thread.
    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is not supported on this platform; always succeeds
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
