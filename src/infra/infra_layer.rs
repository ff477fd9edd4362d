// The infra module contains implementations of core traits.
// Each feature implementation goes in its own submodule.

#[path = "classifier/mod.rs"]
pub mod classifier;

#[path = "reports/mod.rs"]
pub mod reports;
