//! # BlackPearl registry core
//!
//! The data model for deployed web applications and the immutable registry
//! the built-in introspection module reads from.
//!
//! An embedding server deploys applications through [`RegistryBuilder`] at
//! startup; after [`RegistryBuilder::build`] succeeds the registry never
//! changes, so request-path code reads it without locking. All lookups
//! return `Option`; converting an absent URL into a client-visible error is
//! the caller's job.

pub mod application;
pub mod datatype;
pub mod registry;

pub use application::{
    Application, Parameter, Posthandler, Preprocessor, TestFn, TestSet, WebModule,
};
pub use datatype::TypeSpec;
pub use registry::{Registry, RegistryBuilder, RegistryError};
