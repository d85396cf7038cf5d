//! Command-line surface for `backlog`.

use clap::{Parser, Subcommand, ValueEnum};

use crate::api::{IssueSearch, SortOrder, DEFAULT_NOTIFICATION_COUNT};

const ENVIRONMENT_HELP: &str = "\
Environment:
  BACKLOG_DOMAIN   Backlog space domain (e.g., mycompany.backlog.com)
  BACKLOG_API_KEY  Backlog API key
  BACKLOG_LOG_DIR  Directory for log files (optional)";

/// Backlog API Client
#[derive(Parser, Debug)]
#[command(name = "backlog", version, about, long_about = None, after_help = ENVIRONMENT_HELP)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Get space info
    GetSpace,
    /// Get authenticated user
    GetMyself,
    /// List users
    GetUsers,
    /// List priorities
    GetPriorities,
    /// List projects
    GetProjects {
        /// Only archived projects
        #[arg(long)]
        archived: bool,
    },
    /// Get project details
    GetProject {
        #[arg(value_name = "projectIdOrKey")]
        project_id_or_key: Option<String>,
    },
    /// List issue types
    GetIssueTypes {
        #[arg(value_name = "projectIdOrKey")]
        project_id_or_key: Option<String>,
    },
    /// List categories
    GetCategories {
        #[arg(value_name = "projectIdOrKey")]
        project_id_or_key: Option<String>,
    },
    /// Search issues
    GetIssues(IssueFilterArgs),
    /// Get issue details
    GetIssue {
        #[arg(value_name = "issueIdOrKey")]
        issue_id_or_key: Option<String>,
    },
    /// Create issue (JSON params)
    CreateIssue {
        /// e.g. '{"projectId":1,"summary":"...","issueTypeId":2,"priorityId":3}'
        #[arg(value_name = "json")]
        json: Option<String>,
    },
    /// Update issue (JSON params)
    UpdateIssue {
        #[arg(value_name = "issueIdOrKey")]
        issue_id_or_key: Option<String>,
        /// e.g. '{"statusId":4,"comment":"Done"}'
        #[arg(value_name = "json")]
        json: Option<String>,
    },
    /// Add a comment to an issue
    AddComment {
        #[arg(value_name = "issueIdOrKey")]
        issue_id_or_key: Option<String>,
        #[arg(value_name = "content", allow_hyphen_values = true)]
        content: Option<String>,
    },
    /// Get issue comments
    GetComments {
        #[arg(value_name = "issueIdOrKey")]
        issue_id_or_key: Option<String>,
    },
    /// Get notifications
    GetNotifications {
        #[arg(long, value_name = "N", default_value_t = DEFAULT_NOTIFICATION_COUNT)]
        count: u32,
    },
    /// Count unread notifications
    CountNotifications,
}

/// Filters for `get-issues`. Id flags may be repeated or comma-separated.
#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilterArgs {
    #[arg(long = "project", value_name = "ID", value_delimiter = ',')]
    pub project_ids: Vec<u64>,
    #[arg(long = "issue-type", value_name = "ID", value_delimiter = ',')]
    pub issue_type_ids: Vec<u64>,
    #[arg(long = "status", value_name = "ID", value_delimiter = ',')]
    pub status_ids: Vec<u64>,
    #[arg(long = "priority", value_name = "ID", value_delimiter = ',')]
    pub priority_ids: Vec<u64>,
    #[arg(long = "assignee", value_name = "ID", value_delimiter = ',')]
    pub assignee_ids: Vec<u64>,
    #[arg(long, value_name = "TEXT")]
    pub keyword: Option<String>,
    #[arg(long, value_name = "N")]
    pub count: Option<u32>,
    #[arg(long, value_name = "N")]
    pub offset: Option<u32>,
    /// Sort field, e.g. created, updated, priority
    #[arg(long, value_name = "FIELD")]
    pub sort: Option<String>,
    #[arg(long, value_enum)]
    pub order: Option<OrderArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderArg {
    Asc,
    Desc,
}

impl From<OrderArg> for SortOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Asc => SortOrder::Asc,
            OrderArg::Desc => SortOrder::Desc,
        }
    }
}

impl From<IssueFilterArgs> for IssueSearch {
    fn from(args: IssueFilterArgs) -> Self {
        IssueSearch {
            project_ids: args.project_ids,
            issue_type_ids: args.issue_type_ids,
            status_ids: args.status_ids,
            priority_ids: args.priority_ids,
            assignee_ids: args.assignee_ids,
            keyword: args.keyword,
            count: args.count,
            offset: args.offset,
            sort: args.sort,
            order: args.order.map(SortOrder::from),
        }
    }
}

/// First line of a clap error, without its `error: ` prefix.
pub fn usage_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Commands {
        let argv = std::iter::once("backlog").chain(args.iter().copied());
        Cli::try_parse_from(argv)
            .unwrap()
            .command
            .unwrap()
    }

    #[test]
    fn test_parse_archived_flag() {
        assert_eq!(
            parse(&["get-projects", "--archived"]),
            Commands::GetProjects { archived: true }
        );
        assert_eq!(
            parse(&["get-projects"]),
            Commands::GetProjects { archived: false }
        );
    }

    #[test]
    fn test_missing_positional_is_none() {
        assert_eq!(
            parse(&["get-issue"]),
            Commands::GetIssue {
                issue_id_or_key: None
            }
        );
    }

    #[test]
    fn test_parse_issue_filters() {
        let cmd = parse(&[
            "get-issues",
            "--project=10",
            "--status=1,2",
            "--status=3",
            "--keyword=login bug",
            "--count=50",
            "--order=desc",
        ]);
        let Commands::GetIssues(args) = cmd else {
            panic!("expected get-issues");
        };
        let search = IssueSearch::from(args);
        assert_eq!(search.project_ids, vec![10]);
        assert_eq!(search.status_ids, vec![1, 2, 3]);
        assert_eq!(search.keyword.as_deref(), Some("login bug"));
        assert_eq!(search.count, Some(50));
        assert_eq!(search.order, Some(SortOrder::Desc));
        assert!(search.assignee_ids.is_empty());
    }

    #[test]
    fn test_non_numeric_id_rejected() {
        let result = Cli::try_parse_from(["backlog", "get-issues", "--project=abc"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_notification_count_default() {
        assert_eq!(
            parse(&["get-notifications"]),
            Commands::GetNotifications { count: 20 }
        );
        assert_eq!(
            parse(&["get-notifications", "--count=5"]),
            Commands::GetNotifications { count: 5 }
        );
    }

    #[test]
    fn test_unknown_command_rejected() {
        let err = Cli::try_parse_from(["backlog", "get-everything"]).unwrap_err();
        assert!(err.to_string().contains("get-everything"));
    }

    #[test]
    fn test_no_command_is_none() {
        let cli = Cli::try_parse_from(["backlog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_usage_message_is_single_line() {
        let err = Cli::try_parse_from(["backlog", "get-everything"]).unwrap_err();
        let msg = usage_message(&err);
        assert!(!msg.contains('\n'));
        assert!(!msg.starts_with("error:"));
        assert!(msg.contains("get-everything"));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
