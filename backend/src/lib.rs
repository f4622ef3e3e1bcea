//! Backend library modules for the recipe box service.
//!
//! The crate follows a hexagonal layout: `domain` owns entities, ports, and
//! services; `inbound` adapts HTTP requests onto the driving ports; `outbound`
//! implements the driven ports against PostgreSQL and the remote recipe
//! provider; `server` assembles everything into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
