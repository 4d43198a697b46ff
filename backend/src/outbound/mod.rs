//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **employee_api**: reqwest-backed client for the upstream employee
//!   directory API
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod employee_api;
