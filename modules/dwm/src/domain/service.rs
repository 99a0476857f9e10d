use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, instrument};

use blackpearl_registry::{Registry, TestSet};

use crate::domain::error::DomainError;
use crate::domain::signature::{describe, ParameterSpec};

/// Summary of one deployed application.
#[derive(Debug, Clone)]
pub struct ApplicationSummary {
    pub name: String,
    pub description: String,
    /// Registered URLs, sorted lexicographically.
    pub modules: Vec<String>,
    /// Preprocessor names, sorted lexicographically.
    pub preprocessors: Vec<String>,
    /// Posthandler names, sorted lexicographically.
    pub posthandlers: Vec<String>,
    /// Handler module identifiers, source order preserved.
    pub handlers: Vec<String>,
}

/// Signature report for one URL.
#[derive(Debug, Clone)]
pub struct SignatureInfo {
    pub signature: Vec<ParameterSpec>,
    pub desc: String,
    pub testsets: Vec<TestSetInfo>,
}

/// Name and description of one registered test set; the function itself is
/// never exposed.
#[derive(Debug, Clone)]
pub struct TestSetInfo {
    pub name: String,
    pub desc: String,
}

impl From<&TestSet> for TestSetInfo {
    fn from(testset: &TestSet) -> Self {
        Self {
            name: testset.name.clone(),
            desc: testset.desc.clone(),
        }
    }
}

/// Outcome of one executed test set.
#[derive(Debug)]
pub struct TestRun {
    pub name: String,
    pub outcome: Result<Value, anyhow::Error>,
}

/// Read-only introspection and self-test execution over the deployed
/// application registry.
#[derive(Clone)]
pub struct DwmService {
    registry: Arc<Registry>,
}

impl DwmService {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Summarize every deployed application, sorted by name.
    #[instrument(name = "dwm.service.applications", skip(self))]
    pub fn applications(&self) -> Vec<ApplicationSummary> {
        debug!("Listing deployed applications");

        let mut ret: Vec<ApplicationSummary> = self
            .registry
            .applications()
            .iter()
            .map(|app| {
                let mut modules: Vec<String> = app.webmodules.keys().cloned().collect();
                modules.sort();

                let mut preprocessors: Vec<String> =
                    app.preprocessors.iter().map(|p| p.name.clone()).collect();
                preprocessors.sort();

                let mut posthandlers: Vec<String> =
                    app.posthandlers.iter().map(|p| p.name.clone()).collect();
                posthandlers.sort();

                ApplicationSummary {
                    name: app.name.clone(),
                    description: app.desc.clone(),
                    modules,
                    preprocessors,
                    posthandlers,
                    handlers: app.handlers.clone(),
                }
            })
            .collect();

        ret.sort_by(|a, b| a.name.cmp(&b.name));
        ret
    }

    /// Describe the handler signature registered at `url`, together with the
    /// names of its test sets. A URL without test sets is a normal case and
    /// yields an empty list.
    #[instrument(name = "dwm.service.signature", skip(self), fields(url = %url))]
    pub fn signature(&self, url: &str) -> Result<SignatureInfo, DomainError> {
        let module = self
            .registry
            .webmodule(url)
            .ok_or_else(|| DomainError::url_not_found(url))?;

        let testsets = self
            .registry
            .testsets(url)
            .unwrap_or_default()
            .iter()
            .map(TestSetInfo::from)
            .collect();

        Ok(SignatureInfo {
            signature: describe(&module.signature),
            desc: module.desc.clone(),
            testsets,
        })
    }

    /// List the test sets registered at `url`.
    #[instrument(name = "dwm.service.testsets", skip(self), fields(url = %url))]
    pub fn testsets(&self, url: &str) -> Result<Vec<TestSetInfo>, DomainError> {
        let sets = self.registered_testsets(url)?;
        Ok(sets.iter().map(TestSetInfo::from).collect())
    }

    /// Run the test set registered at `url` under `name` and hand back
    /// whatever it returns. On duplicate names the first match in
    /// registration order wins.
    #[instrument(name = "dwm.service.run_testset", skip(self), fields(url = %url, name = %name))]
    pub fn run_testset(&self, url: &str, name: &str) -> Result<Value, DomainError> {
        if self.registry.app_for_url(url).is_none() {
            return Err(DomainError::url_not_found(url));
        }

        let testset = self
            .registry
            .testsets(url)
            .unwrap_or_default()
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| DomainError::name_not_found(name))?;

        info!("Running testset");
        let data = (testset.func)()?;
        Ok(data)
    }

    /// Run every test set registered at `url`, in registration order. Each
    /// entry records its own outcome; one failing test does not stop the
    /// rest of the run.
    #[instrument(name = "dwm.service.run_all_testsets", skip(self), fields(url = %url))]
    pub fn run_all_testsets(&self, url: &str) -> Result<Vec<TestRun>, DomainError> {
        let sets = self.registered_testsets(url)?;
        info!(count = sets.len(), "Running all testsets");

        let runs = sets
            .iter()
            .map(|testset| {
                let outcome = (testset.func)();
                if let Err(e) = &outcome {
                    tracing::error!(testset = %testset.name, error = %e, "Testset failed");
                }
                TestRun {
                    name: testset.name.clone(),
                    outcome,
                }
            })
            .collect();

        Ok(runs)
    }

    /// Resolve `url` and its test sets, distinguishing an unknown URL from a
    /// known URL that has none registered.
    fn registered_testsets(&self, url: &str) -> Result<&[TestSet], DomainError> {
        if self.registry.app_for_url(url).is_none() {
            return Err(DomainError::url_not_found(url));
        }
        match self.registry.testsets(url) {
            Some(sets) if !sets.is_empty() => Ok(sets),
            _ => Err(DomainError::no_testsets(url)),
        }
    }
}
