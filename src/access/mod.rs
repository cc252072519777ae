//! Access control decisions
//!
//! Combines a caller's role, the phase classification, and consent
//! status into a single content-modification decision. Pure functions
//! only: role derivation and consent lookup happen in the surrounding
//! layer and arrive here as plain values.

pub mod decision;
pub mod role;

pub use decision::{Decision, ModuleDecision, can_modify_content, decide_for_module};
pub use role::Role;
