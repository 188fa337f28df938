use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidBaseUrl { input: String },
    UnsupportedScheme { scheme: String },
    InvalidFlag { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidBaseUrl { input } => write!(f, "invalid base url: {input}"),
            Self::UnsupportedScheme { scheme } => {
                write!(f, "unsupported url scheme: {scheme} (expected http or https)")
            }
            Self::InvalidFlag { field, value } => write!(f, "invalid value for {field}: {value}"),
        }
    }
}

impl std::error::Error for ValidationError {}
