//! # BalanceHub Core Library
//!
//! Logic behind the BalanceHub dashboards: the balance scheduler's health
//! checks, mentor matching, and the wellbeing chatbot. Every view keeps its
//! state in memory, so the whole library is synchronous and side-effect free
//! apart from reading and writing the TOML config and saved dashboard state.
//!
//! ## Architecture
//!
//! - **Schedule**: intervals and protected (no-zone) rules expanded into
//!   weekly instances
//! - **Balance**: conflict detector for meeting overload, too many meetings,
//!   and work scheduled over protected time
//! - **Mentoring**: profile parsing and weighted compatibility ranking
//! - **Career / Networking**: hand-curated skill lists and the community feed
//! - **Session**: the single owner of all state, handing references to the
//!   detector and matcher
//!
//! ## Key Components
//!
//! - [`SessionContext`]: in-memory session state
//! - [`ConflictDetector`]: advisory schedule warnings
//! - [`MentorMatcher`]: ranked mentor matches
//! - [`BalanceBuddy`]: scripted chatbot
//! - [`CareerTracker`], [`NetworkingHub`]: dashboard state
//! - [`Config`]: user preferences

pub mod balance;
pub mod career;
pub mod chatbot;
pub mod error;
pub mod events;
pub mod identity;
pub mod mentoring;
pub mod networking;
pub mod relaxation;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod storage;

pub use balance::{BalancePreferences, BalanceWarning, ConflictDetector, Severity};
pub use career::{CareerTracker, ProgressOverview};
pub use chatbot::{BalanceBuddy, ChatMessage, Mood, Sender};
pub use error::{ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use identity::{Identity, IdentitySource, StaticIdentity};
pub use mentoring::{compatibility, Match, MentorMatcher, Profile, ProfileDraft, Role};
pub use networking::NetworkingHub;
pub use relaxation::{ExerciseKind, RelaxationTimer};
pub use schedule::{Interval, IntervalCategory, IntervalDraft, IntervalEdit, ProtectedTimeRule};
pub use session::SessionContext;
pub use stats::{DaySummary, WeeklyReport};
pub use storage::Config;
