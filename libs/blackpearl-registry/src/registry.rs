use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::application::{Application, TestSet, WebModule};

/// The final, immutable set of deployed applications.
///
/// Holds every deployed [`Application`] plus a URL index spanning all of
/// them, so every registered URL resolves to exactly one owner. Built once
/// via [`RegistryBuilder`]; request-path code only reads it.
pub struct Registry {
    apps: Vec<Application>,
    // url -> position in `apps`
    url_index: HashMap<String, usize>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.apps.iter().map(|a| a.name.as_str()).collect();
        f.debug_struct("Registry")
            .field("applications", &names)
            .field("url_count", &self.url_index.len())
            .finish()
    }
}

impl Registry {
    /// All deployed applications, in deploy order.
    pub fn applications(&self) -> &[Application] {
        &self.apps
    }

    /// The application owning `url`, if any.
    pub fn app_for_url(&self, url: &str) -> Option<&Application> {
        self.url_index.get(url).map(|&i| &self.apps[i])
    }

    /// The web module registered at `url`, if any.
    pub fn webmodule(&self, url: &str) -> Option<&WebModule> {
        self.app_for_url(url).and_then(|app| app.webmodule(url))
    }

    /// Test sets registered for `url`, if any.
    pub fn testsets(&self, url: &str) -> Option<&[TestSet]> {
        self.app_for_url(url).and_then(|app| app.testsets(url))
    }
}

/// Deploy-time builder the embedding server feeds.
///
/// Keys are application names; uniqueness is enforced at build time.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    apps: Vec<Application>,
    errors: Vec<String>,
}

impl RegistryBuilder {
    pub fn register(&mut self, app: Application) {
        if self.apps.iter().any(|a| a.name == app.name) {
            self.errors
                .push(format!("Application '{}' is already registered", app.name));
            return;
        }
        self.apps.push(app);
    }

    /// Finalize; verify application names, URL ownership and test-set
    /// binding to known URLs.
    pub fn build(self) -> Result<Registry, RegistryError> {
        if !self.errors.is_empty() {
            return Err(RegistryError::InvalidDeployment {
                errors: self.errors,
            });
        }

        let mut url_index: HashMap<String, usize> = HashMap::new();
        for (i, app) in self.apps.iter().enumerate() {
            for url in app.webmodules.keys() {
                if let Some(&prev) = url_index.get(url) {
                    return Err(RegistryError::DuplicateUrl {
                        url: url.clone(),
                        first: self.apps[prev].name.clone(),
                        second: app.name.clone(),
                    });
                }
                url_index.insert(url.clone(), i);
            }

            // every test-set list must hang off a registered URL
            for url in app.testsets.keys() {
                if !app.webmodules.contains_key(url) {
                    return Err(RegistryError::UnknownTestSetUrl {
                        app: app.name.clone(),
                        url: url.clone(),
                    });
                }
            }
        }

        tracing::info!(
            applications = ?self.apps.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            urls = url_index.len(),
            "Deployed application registry built"
        );

        Ok(Registry {
            apps: self.apps,
            url_index,
        })
    }
}

/// Structured errors for registry building.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("URL '{url}' is registered by both '{first}' and '{second}'")]
    DuplicateUrl {
        url: String,
        first: String,
        second: String,
    },
    #[error("application '{app}' has testsets for unregistered URL '{url}'")]
    UnknownTestSetUrl { app: String, url: String },
    #[error("invalid deployment configuration:\n{errors:#?}")]
    InvalidDeployment { errors: Vec<String> },
}
