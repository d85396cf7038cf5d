//! Validated requests, one per CLI command.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::api::{error, BacklogClient, CreateIssueParams, IssueSearch, UpdateIssueParams};
use crate::cli::Commands;
use crate::error::{AppError, Result};

/// A command whose required arguments and payloads have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Space,
    Myself,
    Users,
    Priorities,
    Projects { archived: Option<bool> },
    Project(String),
    IssueTypes(String),
    Categories(String),
    Issues(IssueSearch),
    Issue(String),
    CreateIssue(CreateIssueParams),
    UpdateIssue {
        issue_id_or_key: String,
        params: UpdateIssueParams,
    },
    AddComment {
        issue_id_or_key: String,
        content: String,
    },
    Comments(String),
    Notifications { count: u32 },
    CountNotifications,
}

impl TryFrom<Commands> for Request {
    type Error = AppError;

    fn try_from(command: Commands) -> Result<Self> {
        let request = match command {
            Commands::GetSpace => Request::Space,
            Commands::GetMyself => Request::Myself,
            Commands::GetUsers => Request::Users,
            Commands::GetPriorities => Request::Priorities,
            Commands::GetProjects { archived } => Request::Projects {
                archived: archived.then_some(true),
            },
            Commands::GetProject { project_id_or_key } => {
                Request::Project(id_or_key(project_id_or_key, "projectIdOrKey")?)
            }
            Commands::GetIssueTypes { project_id_or_key } => {
                Request::IssueTypes(id_or_key(project_id_or_key, "projectIdOrKey")?)
            }
            Commands::GetCategories { project_id_or_key } => {
                Request::Categories(id_or_key(project_id_or_key, "projectIdOrKey")?)
            }
            Commands::GetIssues(filters) => Request::Issues(filters.into()),
            Commands::GetIssue { issue_id_or_key } => {
                Request::Issue(id_or_key(issue_id_or_key, "issueIdOrKey")?)
            }
            Commands::CreateIssue { json } => {
                let json = required(json, "JSON params")?;
                Request::CreateIssue(parse_params(&json)?)
            }
            Commands::UpdateIssue {
                issue_id_or_key,
                json,
            } => {
                let issue_id_or_key = id_or_key(issue_id_or_key, "issueIdOrKey")?;
                let json = required(json, "JSON params")?;
                let params: UpdateIssueParams = parse_params(&json)?;
                if params.is_empty() {
                    return Err(AppError::validation(
                        "at least one of summary, description, statusId, priorityId, assigneeId, dueDate or comment is required",
                    ));
                }
                Request::UpdateIssue {
                    issue_id_or_key,
                    params,
                }
            }
            Commands::AddComment {
                issue_id_or_key,
                content,
            } => Request::AddComment {
                issue_id_or_key: id_or_key(issue_id_or_key, "issueIdOrKey")?,
                content: required(content, "content")?,
            },
            Commands::GetComments { issue_id_or_key } => {
                Request::Comments(id_or_key(issue_id_or_key, "issueIdOrKey")?)
            }
            Commands::GetNotifications { count } => Request::Notifications { count },
            Commands::CountNotifications => Request::CountNotifications,
        };
        Ok(request)
    }
}

impl Request {
    /// Perform the single API call this request maps to.
    pub async fn send(&self, client: &BacklogClient) -> error::Result<Value> {
        info!(request = self.name(), "Dispatching");
        match self {
            Request::Space => client.get_space().await,
            Request::Myself => client.get_myself().await,
            Request::Users => client.get_users().await,
            Request::Priorities => client.get_priorities().await,
            Request::Projects { archived } => client.get_projects(*archived).await,
            Request::Project(id) => client.get_project(id).await,
            Request::IssueTypes(id) => client.get_issue_types(id).await,
            Request::Categories(id) => client.get_categories(id).await,
            Request::Issues(search) => client.get_issues(search).await,
            Request::Issue(id) => client.get_issue(id).await,
            Request::CreateIssue(params) => client.create_issue(params).await,
            Request::UpdateIssue {
                issue_id_or_key,
                params,
            } => client.update_issue(issue_id_or_key, params).await,
            Request::AddComment {
                issue_id_or_key,
                content,
            } => client.add_comment(issue_id_or_key, content).await,
            Request::Comments(id) => client.get_comments(id).await,
            Request::Notifications { count } => client.get_notifications(*count).await,
            Request::CountNotifications => client.count_notifications().await,
        }
    }

    /// The CLI command name this request came from.
    pub fn name(&self) -> &'static str {
        match self {
            Request::Space => "get-space",
            Request::Myself => "get-myself",
            Request::Users => "get-users",
            Request::Priorities => "get-priorities",
            Request::Projects { .. } => "get-projects",
            Request::Project(_) => "get-project",
            Request::IssueTypes(_) => "get-issue-types",
            Request::Categories(_) => "get-categories",
            Request::Issues(_) => "get-issues",
            Request::Issue(_) => "get-issue",
            Request::CreateIssue(_) => "create-issue",
            Request::UpdateIssue { .. } => "update-issue",
            Request::AddComment { .. } => "add-comment",
            Request::Comments(_) => "get-comments",
            Request::Notifications { .. } => "get-notifications",
            Request::CountNotifications => "count-notifications",
        }
    }
}

/// Require a positional argument; an empty string counts as missing.
fn required(value: Option<String>, name: &'static str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(AppError::MissingArgument(name))
}

/// Require an id or key that can stand alone as a path segment.
///
/// `.` and `..` would be resolved away when joined onto the API base URL and
/// address a different resource, so they are rejected.
fn id_or_key(value: Option<String>, name: &'static str) -> Result<String> {
    let value = required(value, name)?;
    if value == "." || value == ".." {
        return Err(AppError::validation(format!("{} cannot be '{}'", name, value)));
    }
    Ok(value)
}

/// Parse a JSON payload into typed parameters.
///
/// Syntax errors, missing required keys and wrong value types all surface as
/// `InvalidJson` carrying the raw text.
fn parse_params<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let value: Value = serde_json::from_str(raw).map_err(|e| AppError::invalid_json(&e, raw))?;
    serde_json::from_value(value).map_err(|e| AppError::invalid_json(&e, raw))
}
