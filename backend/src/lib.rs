//! Employee directory facade library modules.
//!
//! The crate is laid out hexagonally: [`domain`] holds the employee model,
//! the ports and the facade service; [`inbound`] exposes the facade over
//! HTTP; [`outbound`] talks to the upstream directory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
