use std::{error::Error as StdError, fmt};

/// What went wrong during a bind call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindErrorKind {
    ParameterIndexOutOfRange,
    UnknownParameterName,
    InvalidArrayLength,
    UnsupportedValueType,
    UnsupportedNestedType,
    UnderlyingBindFailure,
}

/// The statement parameter an error refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    /// 1-based slot index.
    Index(u32),
    /// Name as given by the caller, before any prefix was tried.
    Name(String),
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Parameter::Index(index) => write!(f, "{}", index),
            Parameter::Name(name) => write!(f, "`{}`", name),
        }
    }
}

/// Failure of a bind call. Bindings written before the failure stay applied.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct BindError {
    kind: BindErrorKind,
    parameter: Option<Parameter>,
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl BindError {
    pub fn new(kind: BindErrorKind, parameter: Option<Parameter>, message: String) -> Self {
        Self {
            kind,
            parameter,
            message,
            source: None,
        }
    }

    pub fn kind(&self) -> BindErrorKind {
        self.kind
    }

    pub fn parameter(&self) -> Option<&Parameter> {
        self.parameter.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub(crate) fn out_of_range(parameter: Parameter, index: u32, count: u32) -> Self {
        Self::new(
            BindErrorKind::ParameterIndexOutOfRange,
            Some(parameter),
            format!(
                "Parameter index {} is out of range, the statement has {} parameter{}",
                index,
                count,
                if count == 1 { "" } else { "s" }
            ),
        )
    }

    pub(crate) fn unknown_name(name: &str) -> Self {
        Self::new(
            BindErrorKind::UnknownParameterName,
            Some(Parameter::Name(name.to_owned())),
            format!("The statement has no parameter named `{}`", name),
        )
    }

    pub(crate) fn invalid_length(length: Option<f64>) -> Self {
        Self::new(
            BindErrorKind::InvalidArrayLength,
            None,
            match length {
                Some(length) => format!("Array-like length {} is not a valid length", length),
                None => "Array-like value does not report a length".to_string(),
            },
        )
    }

    pub(crate) fn unsupported_type(parameter: Parameter, type_name: &str) -> Self {
        Self::new(
            BindErrorKind::UnsupportedValueType,
            Some(parameter.clone()),
            format!(
                "Cannot bind a value of type {} to parameter {}, only numbers, strings, buffers and null are supported",
                type_name, parameter
            ),
        )
    }

    pub(crate) fn nested(parameter: Parameter, type_name: &str) -> Self {
        Self::new(
            BindErrorKind::UnsupportedNestedType,
            Some(parameter.clone()),
            format!(
                "Cannot bind a nested {} to parameter {}, containers are only accepted at the top level",
                type_name, parameter
            ),
        )
    }

    pub(crate) fn underlying(parameter: Parameter, error: crate::Error) -> Self {
        Self {
            kind: BindErrorKind::UnderlyingBindFailure,
            message: format!("Cannot bind parameter {}: {:#}", parameter, error),
            parameter: Some(parameter),
            source: Some(error.into()),
        }
    }
}
