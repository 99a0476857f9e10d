use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::service::{ApplicationSummary, SignatureInfo, TestRun, TestSetInfo};
use crate::domain::signature::ParameterSpec;

/// REST DTO for one deployed application summary
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApplicationDto {
    pub name: String,
    pub description: String,
    pub modules: Vec<String>,
    pub preprocessors: Vec<String>,
    pub posthandlers: Vec<String>,
    pub handlers: Vec<String>,
}

/// REST DTO for one described handler parameter
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ParameterDto {
    pub arg: String,
    /// Printable form of the declared annotation; null when none was declared.
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    /// Enumerated legal values or structured format descriptor; null for all
    /// other annotation kinds.
    #[schema(value_type = Option<Object>)]
    pub type_def: Option<Value>,
}

/// REST DTO for the signature response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignatureDto {
    pub signature: Vec<ParameterDto>,
    pub desc: String,
    pub testsets: Vec<TestSetDto>,
}

/// REST DTO for one test-set listing entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestSetDto {
    pub name: String,
    pub desc: String,
}

/// REST DTO for the outcome of one executed test set
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TestRunDto {
    #[serde(rename = "TestSet")]
    pub test_set: String,
    /// Payload returned by the test function, when it succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    /// Failure message, when it did not.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// Conversion implementations

impl From<ApplicationSummary> for ApplicationDto {
    fn from(summary: ApplicationSummary) -> Self {
        Self {
            name: summary.name,
            description: summary.description,
            modules: summary.modules,
            preprocessors: summary.preprocessors,
            posthandlers: summary.posthandlers,
            handlers: summary.handlers,
        }
    }
}

impl From<ParameterSpec> for ParameterDto {
    fn from(spec: ParameterSpec) -> Self {
        Self {
            arg: spec.arg,
            type_name: spec.type_name,
            type_def: spec.type_def,
        }
    }
}

impl From<TestSetInfo> for TestSetDto {
    fn from(info: TestSetInfo) -> Self {
        Self {
            name: info.name,
            desc: info.desc,
        }
    }
}

impl From<SignatureInfo> for SignatureDto {
    fn from(info: SignatureInfo) -> Self {
        Self {
            signature: info.signature.into_iter().map(Into::into).collect(),
            desc: info.desc,
            testsets: info.testsets.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<TestRun> for TestRunDto {
    fn from(run: TestRun) -> Self {
        match run.outcome {
            Ok(data) => Self {
                test_set: run.name,
                data: Some(data),
                error: None,
            },
            Err(e) => Self {
                test_set: run.name,
                data: None,
                error: Some(e.to_string()),
            },
        }
    }
}
