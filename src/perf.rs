//! Scoped timing for pointer handlers and hit testing.
//!
//! Enable with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! rectboard = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn handle_pointer_move() {
//!     profile_scope!("pointer_move");
//!     // ... event handling code ...
//! }
//! ```
//!
//! Without the feature `profile_scope!` expands to nothing measurable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Pointer events arrive at display rate; anything slower than one frame is
/// worth a warning.
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Default per-scope warning threshold used by `profile_scope!(name)`
const DEFAULT_SCOPE_THRESHOLD_MS: f64 = 2.0;

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// Enable or disable profiling at runtime.
/// Only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer that warns when its scope outlives a threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    active: bool,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            active: true,
        }
    }

    /// Timer used by `profile_scope!`; inert when profiling is switched off.
    pub fn for_profiling(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms: DEFAULT_SCOPE_THRESHOLD_MS,
            active: is_profiling_enabled(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let elapsed = self.elapsed_ms();
        if elapsed > self.threshold_ms {
            warn!(
                "Slow operation: {} took {:.2}ms (threshold: {:.2}ms)",
                self.name, elapsed, self.threshold_ms
            );
        } else {
            #[cfg(feature = "profiling")]
            trace!("{}: {:.3}ms", self.name, elapsed);
        }
    }
}
