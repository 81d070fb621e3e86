//! Timing instrumentation for the pipeline.
//!
//! `ScopedTimer` measures a named scope and logs when it runs past its
//! threshold. The `profile_scope!` macro creates one only when the crate is
//! built with the `profiling` feature:
//!
//! ```ignore
//! fn compose_window() {
//!     profile_scope!("compose");
//!     // ... work ...
//! }
//! ```

use crate::constants::FRAME_BUDGET_MS;
use std::time::Instant;
use tracing::{trace, warn};

/// Time the rest of the enclosing scope. No-op without the `profiling` feature.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $crate::constants::FRAME_BUDGET_MS);
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

/// RAII timer that logs its scope's duration on drop
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Create a timer that warns past one frame budget.
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, FRAME_BUDGET_MS)
    }

    /// Elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        } else {
            trace!(operation = self.name, elapsed_ms, "operation timing");
        }
    }
}
