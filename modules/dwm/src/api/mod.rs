//! JSON contract of the built-in meta-endpoints.
//!
//! The ingress host binds each operation at its fixed path and translates
//! [`DomainError`](crate::domain::error::DomainError) not-found kinds into
//! its client-visible error response; status-code mapping stays on the host
//! side.

pub mod dto;

/// Path serving [`DwmService::applications`](crate::DwmService::applications).
pub const APPLICATIONS_PATH: &str = "/applications";
/// Path serving [`DwmService::signature`](crate::DwmService::signature).
pub const SIGNATURE_PATH: &str = "/signature";
/// Path serving [`DwmService::testsets`](crate::DwmService::testsets).
pub const TESTSETS_PATH: &str = "/testing/testsets";
/// Path serving [`DwmService::run_testset`](crate::DwmService::run_testset).
pub const RUN_TESTSET_PATH: &str = "/testing/run";
/// Path serving [`DwmService::run_all_testsets`](crate::DwmService::run_all_testsets).
pub const RUN_ALL_TESTSETS_PATH: &str = "/testing/run_all";
