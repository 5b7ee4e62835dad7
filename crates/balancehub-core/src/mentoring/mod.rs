//! Mentor matching.
//!
//! Profiles come from form input ([`ProfileDraft`]) or the built-in
//! [`sample_directory`]; [`MentorMatcher`] ranks mentors for a mentee by
//! [`compatibility`].

mod directory;
pub mod profile;
pub mod scoring;

pub use directory::sample_directory;
pub use profile::{parse_labels, AvailabilitySlot, Profile, ProfileDraft, Role};
pub use scoring::{
    compatibility, overlap_ratio, CompatibilityBreakdown, Match, MentorMatcher,
    DEFAULT_MAX_MATCHES,
};
