//! Balance scheduler heuristics: preferences and the conflict detector.

pub mod detector;
pub mod preferences;

pub use detector::{boundary_violations, BalanceWarning, ConflictDetector, Severity};
pub use preferences::{BalancePreferences, WorkHours};
