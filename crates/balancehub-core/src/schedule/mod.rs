//! Calendar types for the balance scheduler.
//!
//! - [`Interval`]: a work, personal, or protected block
//! - [`ProtectedTimeRule`]: a no-zone rule expanded into weekly intervals

pub mod interval;
pub mod protected;

pub use interval::{Interval, IntervalCategory, IntervalDraft, IntervalEdit, RuleOrigin};
pub use protected::{
    expand_rules, week_start_of, ProtectedExpansion, ProtectedTimeRule, DEFAULT_HORIZON_WEEKS,
    PROTECTED_TITLE,
};
