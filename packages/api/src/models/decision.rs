//! Decisions and their create/update payloads.

use serde::{Deserialize, Serialize};

use super::option::DecisionOption;
use crate::error::ApiError;

pub(crate) const TITLE_REQUIRED: &str = "Title is required";

/// A user-owned item to be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Absent in list responses from some server versions.
    #[serde(default)]
    pub options: Vec<DecisionOption>,
}

/// Body of `POST /decisions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewDecision {
    pub title: String,
    pub description: Option<String>,
}

impl NewDecision {
    /// Build from form input. A blank description becomes `None`.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let description = description.into();
        Self {
            title: title.into(),
            description: (!description.trim().is_empty()).then_some(description),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::invalid(TITLE_REQUIRED));
        }
        Ok(())
    }
}

/// Body of `PATCH /decisions/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecisionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DecisionPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        match &self.title {
            Some(title) if title.trim().is_empty() => Err(ApiError::invalid(TITLE_REQUIRED)),
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}
