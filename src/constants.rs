//! Crate-wide constants.
//!
//! Centralizes the defaults for virtual scrolling and column sizing so the
//! config layer and the pipeline agree on them.

// ============================================================================
// Virtual Scrolling
// ============================================================================

/// Rows rendered above and below the viewport when no overscan is configured
pub const DEFAULT_OVERSCAN: usize = 20;

/// Estimated row height in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 28.0;

/// Viewport height in pixels assumed before the container has been measured
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

// ============================================================================
// Timing
// ============================================================================

/// Frame budget in milliseconds; a compose slower than this is logged
pub const FRAME_BUDGET_MS: f64 = 16.67;
