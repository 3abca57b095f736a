//! Options under a decision and their 1–5 rating.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub(crate) const OPTION_TEXT_REQUIRED: &str = "Option text is required";

/// An integer rating in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Parse a form field. Empty input means "no rating".
    pub fn parse_input(input: &str) -> Result<Option<Self>, ApiError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        input
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .map(Some)
            .ok_or_else(|| ApiError::invalid("Rating must be between 1 and 5"))
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("rating {value} is outside 1..=5"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// A named alternative under a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOption {
    pub id: String,
    pub decision_id: String,
    pub option_text: String,
    #[serde(default)]
    pub rating: Option<Rating>,
}

/// Body of `POST /options`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOption {
    pub decision_id: String,
    pub option_text: String,
    pub rating: Option<Rating>,
}

impl NewOption {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.option_text.trim().is_empty() {
            return Err(ApiError::invalid(OPTION_TEXT_REQUIRED));
        }
        Ok(())
    }
}

/// Body of `PATCH /options/{id}`. Both fields are always sent; a `None`
/// rating clears it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionPatch {
    pub option_text: String,
    pub rating: Option<Rating>,
}

impl OptionPatch {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.option_text.trim().is_empty() {
            return Err(ApiError::invalid(OPTION_TEXT_REQUIRED));
        }
        Ok(())
    }
}
