//! Deployed-webapps manager, the built-in introspection module.
//!
//! Answers read-only queries over the deployed application registry (list
//! applications, describe a handler signature, list a URL's test sets) and
//! runs per-URL self-tests. Transport wiring lives in the ingress host; this
//! crate owns the operations and their JSON contract.

pub mod api;
pub mod domain;

pub use domain::error::DomainError;
pub use domain::service::DwmService;
