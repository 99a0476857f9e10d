use thiserror::Error;

/// Errors surfaced by the deployed-webapps-manager operations.
///
/// The not-found kinds are the only signal the transport layer is expected
/// to map onto its client-visible error status; failures raised inside
/// user-supplied test functions pass through untouched.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("The URL <{url}> not found")]
    UrlNotFound { url: String },

    #[error("The name <{name}> not found")]
    NameNotFound { name: String },

    #[error("No testsets found for url <{url}>")]
    NoTestSets { url: String },

    /// Failure raised inside a user-supplied test function.
    #[error(transparent)]
    Test(#[from] anyhow::Error),
}

impl DomainError {
    pub fn url_not_found(url: impl Into<String>) -> Self {
        Self::UrlNotFound { url: url.into() }
    }

    pub fn name_not_found(name: impl Into<String>) -> Self {
        Self::NameNotFound { name: name.into() }
    }

    pub fn no_testsets(url: impl Into<String>) -> Self {
        Self::NoTestSets { url: url.into() }
    }

    /// Whether the transport layer should answer with its not-found status.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UrlNotFound { .. } | Self::NameNotFound { .. } | Self::NoTestSets { .. }
        )
    }
}
