// Eligibility & seeding engine.
//
// Everything in here is pure and synchronous: it takes a snapshot of the
// event catalog, the selected platforms, and the purpose table, and returns
// freshly computed results. Nothing is mutated in place and nothing does I/O,
// so callers can recompute on every input change and simply discard stale
// results.

pub mod advisory;
pub mod aggregate;
pub mod cache;
pub mod problematic;
pub mod seeding;
pub mod selection;
pub mod validation;

pub use advisory::{all_purposes_disabled, data_shortfall, DataShortfall};
pub use aggregate::{selected_events_count, total_selected_events};
pub use cache::ValidationCache;
pub use problematic::{find_problematic_platforms, ProblematicPlatform};
pub use seeding::{seed_events, seed_for_purpose, DEFAULT_SEED_THRESHOLD};
pub use selection::EventSelection;
pub use validation::{
    validate_purpose, validate_purpose_id, validate_purposes, PlatformValidationResult,
    ValidationResults,
};
