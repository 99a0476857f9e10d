use std::fmt;

use serde_json::Value;

/// Declared annotation of a handler parameter.
///
/// Handlers annotate parameters with one of a closed set of kinds, so the
/// introspection layer can match on them exhaustively when it builds a
/// client-facing schema. The `*List` variants carry the same metadata as
/// their scalar counterparts and mark the parameter as list-valued.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSpec {
    /// A plain named type with no extra metadata.
    Named(String),
    /// A fixed enumerated set of legal values.
    Options(Vec<Value>),
    /// Enumerated legal values for a list-valued parameter.
    OptionsList(Vec<Value>),
    /// A structured data-shape descriptor.
    Format(Value),
    /// A structured data-shape descriptor for a list-valued parameter.
    FormatList(Value),
}

impl TypeSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Options(values) => write!(f, "options{}", Value::Array(values.clone())),
            Self::OptionsList(values) => write!(f, "options_list{}", Value::Array(values.clone())),
            Self::Format(def) => write!(f, "format({def})"),
            Self::FormatList(def) => write!(f, "format_list({def})"),
        }
    }
}
