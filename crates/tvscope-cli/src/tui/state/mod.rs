//! View-state controllers for the browser screens.
//!
//! Pure state machines: every transition is a function of the current
//! state and one event. Fetch dispatch and timing are injected by the
//! caller, so all transitions are unit-testable without a terminal or
//! a runtime. No rendering type appears in this module tree.

pub mod detail;
pub mod home;
pub mod remote;
pub mod search;
