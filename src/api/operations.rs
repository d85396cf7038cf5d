//! One method per Backlog endpoint the CLI exposes.
//!
//! Each operation maps its typed parameters onto exactly one request.

use serde_json::Value;
use tracing::instrument;

use super::client::BacklogClient;
use super::endpoint::{segment, Endpoint};
use super::error::Result;
use super::types::{CreateIssueParams, IssueSearch, UpdateIssueParams};

/// Notifications returned when no count is given.
pub const DEFAULT_NOTIFICATION_COUNT: u32 = 20;

impl BacklogClient {
    /// `GET /space`
    pub async fn get_space(&self) -> Result<Value> {
        self.get(&Endpoint::new("space")).await
    }

    /// `GET /users/myself`
    pub async fn get_myself(&self) -> Result<Value> {
        self.get(&Endpoint::new("users/myself")).await
    }

    /// `GET /users`
    pub async fn get_users(&self) -> Result<Value> {
        self.get(&Endpoint::new("users")).await
    }

    /// `GET /priorities`
    pub async fn get_priorities(&self) -> Result<Value> {
        self.get(&Endpoint::new("priorities")).await
    }

    /// `GET /projects`, optionally filtered by archived state.
    pub async fn get_projects(&self, archived: Option<bool>) -> Result<Value> {
        self.get(&Endpoint::new("projects").param_opt("archived", archived))
            .await
    }

    /// `GET /projects/{projectIdOrKey}`
    #[instrument(skip(self))]
    pub async fn get_project(&self, project_id_or_key: &str) -> Result<Value> {
        self.get(&Endpoint::new(format!(
            "projects/{}",
            segment(project_id_or_key)
        )))
        .await
    }

    /// `GET /projects/{projectIdOrKey}/issueTypes`
    #[instrument(skip(self))]
    pub async fn get_issue_types(&self, project_id_or_key: &str) -> Result<Value> {
        self.get(&Endpoint::new(format!(
            "projects/{}/issueTypes",
            segment(project_id_or_key)
        )))
        .await
    }

    /// `GET /projects/{projectIdOrKey}/categories`
    #[instrument(skip(self))]
    pub async fn get_categories(&self, project_id_or_key: &str) -> Result<Value> {
        self.get(&Endpoint::new(format!(
            "projects/{}/categories",
            segment(project_id_or_key)
        )))
        .await
    }

    /// Search issues. Returns a single page; `count` and `offset` select it.
    pub async fn get_issues(&self, search: &IssueSearch) -> Result<Value> {
        self.get(&search.endpoint()).await
    }

    /// `GET /issues/{issueIdOrKey}`
    #[instrument(skip(self))]
    pub async fn get_issue(&self, issue_id_or_key: &str) -> Result<Value> {
        self.get(&issue_endpoint(issue_id_or_key, "")).await
    }

    /// `POST /issues`
    #[instrument(skip(self, params), fields(project_id = params.project_id))]
    pub async fn create_issue(&self, params: &CreateIssueParams) -> Result<Value> {
        self.post_form(&Endpoint::new("issues"), &params.to_form())
            .await
    }

    /// `PATCH /issues/{issueIdOrKey}`
    #[instrument(skip(self, params))]
    pub async fn update_issue(
        &self,
        issue_id_or_key: &str,
        params: &UpdateIssueParams,
    ) -> Result<Value> {
        self.patch_form(&issue_endpoint(issue_id_or_key, ""), &params.to_form())
            .await
    }

    /// `POST /issues/{issueIdOrKey}/comments`
    #[instrument(skip(self, content))]
    pub async fn add_comment(&self, issue_id_or_key: &str, content: &str) -> Result<Value> {
        let form = vec![("content", content.to_string())];
        self.post_form(&issue_endpoint(issue_id_or_key, "/comments"), &form)
            .await
    }

    /// `GET /issues/{issueIdOrKey}/comments`
    #[instrument(skip(self))]
    pub async fn get_comments(&self, issue_id_or_key: &str) -> Result<Value> {
        self.get(&issue_endpoint(issue_id_or_key, "/comments"))
            .await
    }

    /// `GET /notifications`
    pub async fn get_notifications(&self, count: u32) -> Result<Value> {
        self.get(&Endpoint::new("notifications").param("count", count))
            .await
    }

    /// `GET /notifications/count`
    pub async fn count_notifications(&self) -> Result<Value> {
        self.get(&Endpoint::new("notifications/count")).await
    }
}

fn issue_endpoint(issue_id_or_key: &str, suffix: &str) -> Endpoint {
    Endpoint::new(format!("issues/{}{}", segment(issue_id_or_key), suffix))
}
