//! Upstream employee directory adapters.
//!
//! This module provides a thin HTTP implementation of the `EmployeeUpstream`
//! port.

mod dto;
mod http_upstream;

pub use http_upstream::ReqwestEmployeeUpstream;
