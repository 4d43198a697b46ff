//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod employee_directory;
mod employee_upstream;

pub use employee_directory::{EmployeeDirectoryCommand, EmployeeDirectoryQuery};
#[cfg(test)]
pub use employee_upstream::MockEmployeeUpstream;
pub use employee_upstream::{
    EmployeeUpstream, EmployeeUpstreamError, Envelope, UpstreamReply, UpstreamStatus,
};
