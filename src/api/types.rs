//! Backlog API request parameter types.
//!
//! Responses are passed through as `serde_json::Value` so that every field the
//! service returns reaches the output. Requests are modeled here.

use std::fmt;

use serde::Deserialize;

use super::endpoint::Endpoint;

/// Ordered `name=value` pairs sent as an `application/x-www-form-urlencoded` body.
pub type FormBody = Vec<(&'static str, String)>;

fn push_opt<T: ToString>(form: &mut FormBody, name: &'static str, value: Option<&T>) {
    if let Some(value) = value {
        form.push((name, value.to_string()));
    }
}

/// Sort direction for issue searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Filters for `GET /api/v2/issues`.
///
/// Every field is optional; empty lists and `None` values are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSearch {
    pub project_ids: Vec<u64>,
    pub issue_type_ids: Vec<u64>,
    pub status_ids: Vec<u64>,
    pub priority_ids: Vec<u64>,
    pub assignee_ids: Vec<u64>,
    pub keyword: Option<String>,
    pub count: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<String>,
    pub order: Option<SortOrder>,
}

impl IssueSearch {
    /// Build the `issues` endpoint carrying these filters.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new("issues")
            .array_param("projectId", &self.project_ids)
            .array_param("issueTypeId", &self.issue_type_ids)
            .array_param("statusId", &self.status_ids)
            .array_param("priorityId", &self.priority_ids)
            .array_param("assigneeId", &self.assignee_ids)
            .param_opt("keyword", self.keyword.as_deref())
            .param_opt("count", self.count)
            .param_opt("offset", self.offset)
            .param_opt("sort", self.sort.as_deref())
            .param_opt("order", self.order)
    }
}

/// Fields for `POST /api/v2/issues`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueParams {
    pub project_id: u64,
    pub summary: String,
    pub issue_type_id: u64,
    pub priority_id: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
}

impl CreateIssueParams {
    /// Serialize to form pairs, leaving out absent optional fields.
    pub fn to_form(&self) -> FormBody {
        let mut form = vec![
            ("projectId", self.project_id.to_string()),
            ("summary", self.summary.clone()),
            ("issueTypeId", self.issue_type_id.to_string()),
            ("priorityId", self.priority_id.to_string()),
        ];
        push_opt(&mut form, "description", self.description.as_ref());
        push_opt(&mut form, "assigneeId", self.assignee_id.as_ref());
        push_opt(&mut form, "dueDate", self.due_date.as_ref());
        push_opt(&mut form, "startDate", self.start_date.as_ref());
        form
    }
}

/// Fields for `PATCH /api/v2/issues/{issueIdOrKey}`.
///
/// `comment` is recorded on the issue alongside the change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueParams {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status_id: Option<u64>,
    #[serde(default)]
    pub priority_id: Option<u64>,
    #[serde(default)]
    pub assignee_id: Option<u64>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl UpdateIssueParams {
    /// Serialize to form pairs, leaving out absent fields.
    pub fn to_form(&self) -> FormBody {
        let mut form = FormBody::new();
        push_opt(&mut form, "summary", self.summary.as_ref());
        push_opt(&mut form, "description", self.description.as_ref());
        push_opt(&mut form, "statusId", self.status_id.as_ref());
        push_opt(&mut form, "priorityId", self.priority_id.as_ref());
        push_opt(&mut form, "assigneeId", self.assignee_id.as_ref());
        push_opt(&mut form, "dueDate", self.due_date.as_ref());
        push_opt(&mut form, "comment", self.comment.as_ref());
        form
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.to_form().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(form: &FormBody) -> Vec<&str> {
        form.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_empty_search_is_bare_path() {
        assert_eq!(IssueSearch::default().endpoint().to_string(), "issues");
    }

    #[test]
    fn test_search_parameter_order() {
        let search = IssueSearch {
            project_ids: vec![10],
            status_ids: vec![1, 2],
            keyword: Some("crash".to_string()),
            count: Some(50),
            order: Some(SortOrder::Desc),
            ..Default::default()
        };
        let endpoint = search.endpoint();
        let names: Vec<&str> = endpoint.query().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec!["projectId[]", "statusId[]", "statusId[]", "keyword", "count", "order"]
        );
        assert_eq!(endpoint.query()[5].1, "desc");
    }

    #[test]
    fn test_search_all_lists() {
        let search = IssueSearch {
            project_ids: vec![1],
            issue_type_ids: vec![2],
            status_ids: vec![3],
            priority_ids: vec![4],
            assignee_ids: vec![5, 6],
            ..Default::default()
        };
        let endpoint = search.endpoint();
        assert_eq!(endpoint.query().len(), 6);
        assert!(endpoint
            .query()
            .contains(&("assigneeId[]".to_string(), "6".to_string())));
    }

    #[test]
    fn test_create_params_from_json() {
        let params: CreateIssueParams = serde_json::from_str(
            r#"{"projectId":1,"summary":"Fix login","issueTypeId":2,"priorityId":3}"#,
        )
        .unwrap();
        assert_eq!(params.project_id, 1);
        assert_eq!(params.summary, "Fix login");
        assert!(params.description.is_none());
    }

    #[test]
    fn test_create_params_missing_required_field() {
        let err = serde_json::from_str::<CreateIssueParams>(r#"{"projectId":1}"#).unwrap_err();
        assert!(err.to_string().contains("summary"));
    }

    #[test]
    fn test_create_params_wrong_type() {
        let result = serde_json::from_str::<CreateIssueParams>(
            r#"{"projectId":"one","summary":"x","issueTypeId":2,"priorityId":3}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_form_omits_absent_fields() {
        let params = CreateIssueParams {
            project_id: 1,
            summary: "Fix login".to_string(),
            issue_type_id: 2,
            priority_id: 3,
            description: None,
            assignee_id: Some(7),
            due_date: None,
            start_date: None,
        };
        let form = params.to_form();
        assert_eq!(
            keys(&form),
            vec!["projectId", "summary", "issueTypeId", "priorityId", "assigneeId"]
        );
    }

    #[test]
    fn test_update_form_omits_absent_fields() {
        let params = UpdateIssueParams {
            status_id: Some(4),
            comment: Some("done".to_string()),
            ..Default::default()
        };
        let form = params.to_form();
        assert_eq!(
            form,
            vec![("statusId", "4".to_string()), ("comment", "done".to_string())]
        );
    }

    #[test]
    fn test_update_is_empty() {
        assert!(UpdateIssueParams::default().is_empty());
        let params: UpdateIssueParams = serde_json::from_str(r#"{"summary":"x"}"#).unwrap();
        assert!(!params.is_empty());
    }
}
