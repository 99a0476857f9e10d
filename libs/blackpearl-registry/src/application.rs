use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::datatype::TypeSpec;

/// Zero-argument self-test function attached to a URL.
///
/// Returns an arbitrary JSON-serializable payload; whatever it fails with is
/// surfaced to the caller untouched.
pub type TestFn = Arc<dyn Fn() -> anyhow::Result<Value> + Send + Sync>;

/// One declared handler parameter, in signature order.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: String,
    /// Declared annotation; `None` when the handler declared none.
    pub spec: Option<TypeSpec>,
}

impl Parameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            spec: None,
        }
    }

    pub fn with_spec(mut self, spec: TypeSpec) -> Self {
        self.spec = Some(spec);
        self
    }
}

/// A handler bound to a URL within a deployed application.
#[derive(Debug, Clone)]
pub struct WebModule {
    pub url: String,
    pub signature: Vec<Parameter>,
    pub desc: String,
}

impl WebModule {
    pub fn new(url: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            signature: Vec::new(),
            desc: desc.into(),
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.signature.push(parameter);
        self
    }
}

/// A named, described self-test for one URL.
///
/// Names are assumed unique within a URL's test-set list; lookups take the
/// first match in registration order.
#[derive(Clone)]
pub struct TestSet {
    pub name: String,
    pub desc: String,
    pub func: TestFn,
}

impl TestSet {
    pub fn new(
        name: impl Into<String>,
        desc: impl Into<String>,
        func: impl Fn() -> anyhow::Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for TestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestSet")
            .field("name", &self.name)
            .field("desc", &self.desc)
            .finish()
    }
}

/// Named request preprocessor; execution order comes from the application
/// configuration.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    pub name: String,
}

/// Named response posthandler; execution order comes from the application
/// configuration.
#[derive(Debug, Clone)]
pub struct Posthandler {
    pub name: String,
}

/// A deployed web application and its per-URL metadata.
///
/// Assembled at deploy time with the `with_*` builders; immutable once
/// handed to [`RegistryBuilder`](crate::registry::RegistryBuilder).
#[derive(Debug, Clone)]
pub struct Application {
    pub name: String,
    pub desc: String,
    pub webmodules: HashMap<String, WebModule>,
    pub testsets: HashMap<String, Vec<TestSet>>,
    pub preprocessors: Vec<Preprocessor>,
    pub posthandlers: Vec<Posthandler>,
    /// Configured handler module identifiers, source order preserved.
    pub handlers: Vec<String>,
}

impl Application {
    pub fn new(name: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: desc.into(),
            webmodules: HashMap::new(),
            testsets: HashMap::new(),
            preprocessors: Vec::new(),
            posthandlers: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// Bind a web module at its URL. Re-registering an already claimed URL
    /// replaces the earlier module.
    pub fn with_webmodule(mut self, module: WebModule) -> Self {
        self.webmodules.insert(module.url.clone(), module);
        self
    }

    /// Append a test set to the URL's list, keeping registration order.
    pub fn with_testset(mut self, url: impl Into<String>, testset: TestSet) -> Self {
        self.testsets.entry(url.into()).or_default().push(testset);
        self
    }

    pub fn with_preprocessor(mut self, name: impl Into<String>) -> Self {
        self.preprocessors.push(Preprocessor { name: name.into() });
        self
    }

    pub fn with_posthandler(mut self, name: impl Into<String>) -> Self {
        self.posthandlers.push(Posthandler { name: name.into() });
        self
    }

    pub fn with_handler(mut self, name: impl Into<String>) -> Self {
        self.handlers.push(name.into());
        self
    }

    pub fn webmodule(&self, url: &str) -> Option<&WebModule> {
        self.webmodules.get(url)
    }

    pub fn testsets(&self, url: &str) -> Option<&[TestSet]> {
        self.testsets.get(url).map(Vec::as_slice)
    }
}
