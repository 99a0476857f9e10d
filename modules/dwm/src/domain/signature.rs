use serde_json::Value;

use blackpearl_registry::{Parameter, TypeSpec};

/// Client-facing description of one handler parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub arg: String,
    /// Printable form of the declared annotation; `None` when the handler
    /// declared none.
    pub type_name: Option<String>,
    /// Enumerated legal values or structured format descriptor, for the
    /// annotation kinds that carry one.
    pub type_def: Option<Value>,
}

/// Turn a handler's declared signature into displayable parameter specs,
/// preserving declaration order.
pub fn describe(signature: &[Parameter]) -> Vec<ParameterSpec> {
    signature.iter().map(describe_parameter).collect()
}

fn describe_parameter(parameter: &Parameter) -> ParameterSpec {
    let mut type_name = None;
    let mut type_def = None;

    if let Some(spec) = &parameter.spec {
        type_name = Some(spec.to_string());
        type_def = match spec {
            TypeSpec::Named(_) => None,
            TypeSpec::Options(values) | TypeSpec::OptionsList(values) => {
                Some(Value::Array(values.clone()))
            }
            TypeSpec::Format(def) | TypeSpec::FormatList(def) => Some(def.clone()),
        };
    }

    ParameterSpec {
        arg: parameter.name.clone(),
        type_name,
        type_def,
    }
}
