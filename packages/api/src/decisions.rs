//! `/decisions` and `/options` endpoints.
//!
//! Create and update calls validate their payload first; an invalid payload
//! never reaches the network.

use reqwest::Method;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Decision, DecisionOption, DecisionPatch, NewDecision, NewOption, OptionPatch};

impl ApiClient {
    /// Decisions owned by the signed-in user.
    pub async fn list_decisions(&self) -> Result<Vec<Decision>, ApiError> {
        self.get_json("/decisions").await
    }

    pub async fn create_decision(&self, decision: &NewDecision) -> Result<Decision, ApiError> {
        decision.validate()?;
        self.send_json(Method::POST, "/decisions", decision).await
    }

    /// A single decision including its options.
    pub async fn get_decision(&self, id: &str) -> Result<Decision, ApiError> {
        self.get_json(&format!("/decisions/{id}")).await
    }

    pub async fn update_decision(&self, id: &str, patch: &DecisionPatch) -> Result<Decision, ApiError> {
        patch.validate()?;
        self.send_json(Method::PATCH, &format!("/decisions/{id}"), patch)
            .await
    }

    /// Options are removed with their decision by the server.
    pub async fn delete_decision(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/decisions/{id}"))
            .await
    }

    pub async fn create_option(&self, option: &NewOption) -> Result<DecisionOption, ApiError> {
        option.validate()?;
        self.send_json(Method::POST, "/options", option).await
    }

    pub async fn list_options(&self, decision_id: &str) -> Result<Vec<DecisionOption>, ApiError> {
        self.get_json(&format!("/options/{decision_id}")).await
    }

    pub async fn update_option(&self, id: &str, patch: &OptionPatch) -> Result<DecisionOption, ApiError> {
        patch.validate()?;
        self.send_json(Method::PATCH, &format!("/options/{id}"), patch)
            .await
    }

    pub async fn delete_option(&self, id: &str) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, &format!("/options/{id}"))
            .await
    }
}
