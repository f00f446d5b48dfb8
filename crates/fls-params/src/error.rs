use std::fmt::Display;

use crate::schema::PhyType;

pub type ParamResult<T> = Result<T, ParamError>;

/// Rejection of a single edit. The model is never partially updated.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Invalid parameter: {field} = {value} ({reason})")]
    InvalidParameter {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unsupported PHY type: {phy} is not enabled")]
    UnsupportedPhyType { phy: PhyType },
}

impl ParamError {
    pub(crate) fn invalid(field: &'static str, value: impl Display, reason: impl Into<String>) -> Self {
        ParamError::InvalidParameter {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type ConfigFileResult<T> = Result<T, ConfigFileError>;

#[derive(thiserror::Error, Debug)]
pub enum ConfigFileError {
    #[error("Parameter error: {0}")]
    Param(#[from] ParamError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
