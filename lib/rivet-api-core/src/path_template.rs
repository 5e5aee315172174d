//! Endpoint path templates.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::{Error, Result};

/// Characters escaped in a path segment: everything except unreserved
/// characters and sub-delimiters.
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

/// A path pattern such as `/group/groups/{group_id}/bans/{identity_id}`.
///
/// Placeholders are filled positionally: the first value replaces the first
/// `{...}`, and so on. The name inside the braces is documentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathTemplate(&'static str);

impl PathTemplate {
    /// Create a new path template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self(template)
    }

    /// Get the template string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }

    /// Number of `{...}` placeholders in the template.
    #[must_use]
    pub fn placeholder_count(&self) -> usize {
        self.0.matches('{').count()
    }

    /// Substitute `values` into the placeholders, percent-encoding each one
    /// as a single path segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the number of values differs from
    /// the number of placeholders, if a placeholder is not closed, or if a
    /// value is empty, `.` or `..`. Those would be normalized away by URL
    /// parsing and address a different endpoint.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> Result<String> {
        let expected = self.placeholder_count();
        if values.len() != expected {
            return Err(Error::invalid_request(format!(
                "path template '{}' expects {expected} parameter(s), got {}",
                self.0,
                values.len()
            )));
        }

        let mut path = String::with_capacity(self.0.len());
        let mut rest = self.0;
        for value in values {
            let Some((head, tail)) = rest.split_once('{') else {
                break;
            };
            let Some((_, tail)) = tail.split_once('}') else {
                return Err(Error::invalid_request(format!(
                    "unclosed placeholder in path template '{}'",
                    self.0
                )));
            };
            let value = value.as_ref();
            if matches!(value, "" | "." | "..") {
                return Err(Error::invalid_request(format!(
                    "path parameter {value:?} is not a valid segment for '{}'",
                    self.0
                )));
            }
            path.push_str(head);
            path.extend(utf8_percent_encode(value, PATH_SEGMENT_ENCODE_SET));
            rest = tail;
        }
        path.push_str(rest);

        Ok(path)
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PathTemplate {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_in_order() {
        let template = PathTemplate::new("/group/groups/{group_id}/bans/{identity_id}");
        let path = template.render(&["g-1", "i-2"]).expect("render");
        assert_eq!(path, "/group/groups/g-1/bans/i-2");
    }

    #[test]
    fn render_without_placeholders() {
        let template = PathTemplate::new("/cloud/devices/links");
        let path = template.render::<&str>(&[]).expect("render");
        assert_eq!(path, "/cloud/devices/links");
    }

    #[test]
    fn render_encodes_segments() {
        let template = PathTemplate::new("/group/invites/{group_invite_code}");
        let path = template.render(&["a b/c?d"]).expect("render");
        assert_eq!(path, "/group/invites/a%20b%2Fc%3Fd");
    }

    #[test]
    fn render_rejects_wrong_arity() {
        let template = PathTemplate::new("/admin/clusters/{cluster_id}/servers");
        let err = template.render::<&str>(&[]).expect_err("missing value");
        assert_eq!(
            err.to_string(),
            "invalid request: path template '/admin/clusters/{cluster_id}/servers' expects 1 parameter(s), got 0"
        );
    }

    #[test]
    fn render_rejects_dot_segments() {
        let template = PathTemplate::new("/group/invites/{group_invite_code}/consume");
        for value in ["", ".", ".."] {
            let err = template.render(&[value]).expect_err("not a segment");
            assert!(matches!(err, Error::InvalidRequest(_)), "{value:?}: {err}");
        }
    }

    #[test]
    fn render_keeps_dots_inside_a_segment() {
        let template = PathTemplate::new("/group/invites/{group_invite_code}");
        let path = template.render(&["..."]).expect("render");
        assert_eq!(path, "/group/invites/...");
        let path = template.render(&["%2e%2e"]).expect("render");
        assert_eq!(path, "/group/invites/%252e%252e");
    }

    #[test]
    fn render_rejects_unclosed_placeholder() {
        let template = PathTemplate::new("/group/groups/{group_id");
        assert!(template.render(&["x"]).is_err());
    }

    #[test]
    fn path_template_as_ref() {
        let template = PathTemplate::new("/group/groups/{group_id}");
        let s: &str = template.as_ref();
        assert_eq!(s, "/group/groups/{group_id}");
        assert_eq!(template.to_string(), "/group/groups/{group_id}");
    }
}
