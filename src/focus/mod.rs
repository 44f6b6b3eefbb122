//! Focus tracking.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FocusTracker`] | State machine deciding focus event emission |
//! | [`ActiveTabSnapshot`] | The one current-truth record of the active tab |

// ============================================================================
// Submodules
// ============================================================================

/// Focus-tracking state machine.
pub mod tracker;

// ============================================================================
// Re-exports
// ============================================================================

pub use tracker::{ActiveTabSnapshot, FocusTracker};
