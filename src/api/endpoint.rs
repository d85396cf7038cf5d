//! Relative API endpoints below `/api/v2/`.

use std::borrow::Cow;
use std::fmt;

/// A relative endpoint path plus its ordered query parameters.
///
/// The textual form is the bare path when there are no parameters, otherwise
/// `path?name=value&...` with every name and value percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    query: Vec<(String, String)>,
}

impl Endpoint {
    /// Create an endpoint without query parameters.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Add a single query parameter.
    pub fn param(mut self, name: &str, value: impl ToString) -> Self {
        self.query.push((name.to_string(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn param_opt<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Add one `name[]` parameter per value.
    pub fn array_param<T: ToString>(mut self, name: &str, values: &[T]) -> Self {
        let key = format!("{}[]", name);
        for value in values {
            self.query.push((key.clone(), value.to_string()));
        }
        self
    }

    /// The path part, without query.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (name, value)) in self.query().iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(
                f,
                "{}{}={}",
                sep,
                urlencoding::encode(name),
                urlencoding::encode(value)
            )?;
        }
        Ok(())
    }
}

/// Percent-encode a user-supplied id or key for use as a path segment.
///
/// Slashes and other reserved characters are encoded. `.` and `..` pass through
/// unchanged and would be resolved as dot segments, so callers reject them first.
pub fn segment(id_or_key: &str) -> Cow<'_, str> {
    urlencoding::encode(id_or_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_path_has_no_question_mark() {
        let endpoint = Endpoint::new("issues");
        assert_eq!(endpoint.to_string(), "issues");
    }

    #[test]
    fn test_absent_optional_param_is_skipped() {
        let endpoint = Endpoint::new("projects").param_opt::<bool>("archived", None);
        assert_eq!(endpoint.to_string(), "projects");
    }

    #[test]
    fn test_present_optional_param() {
        let endpoint = Endpoint::new("projects").param_opt("archived", Some(true));
        assert_eq!(endpoint.to_string(), "projects?archived=true");
    }

    #[test]
    fn test_array_param_repeats_name() {
        let endpoint = Endpoint::new("issues").array_param("statusId", &[1u64, 2, 3]);
        assert_eq!(endpoint.query().len(), 3);
        assert!(endpoint.query().iter().all(|(name, _)| name == "statusId[]"));
        assert_eq!(
            endpoint.to_string(),
            "issues?statusId%5B%5D=1&statusId%5B%5D=2&statusId%5B%5D=3"
        );
    }

    #[test]
    fn test_empty_array_adds_nothing() {
        let endpoint = Endpoint::new("issues").array_param::<u64>("projectId", &[]);
        assert!(endpoint.query().is_empty());
        assert_eq!(endpoint.to_string(), "issues");
    }

    #[test]
    fn test_values_are_encoded() {
        let endpoint = Endpoint::new("issues").param("keyword", "login bug&crash");
        assert_eq!(endpoint.to_string(), "issues?keyword=login%20bug%26crash");
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("PROJ-12"), "PROJ-12");
        assert_eq!(segment("a/b"), "a%2Fb");
    }
}
