// Reach: audience eligibility and event seeding for ad campaigns
//
// This is the library root. `catalog` holds the static inputs, `engine` the
// pure evaluation rules, and the remaining modules are the CLI's plumbing.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod evaluation;
pub mod output;
pub mod snapshot;
pub mod status;
