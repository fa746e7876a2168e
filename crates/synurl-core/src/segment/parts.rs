//! The six standard URL parts.

use std::fmt;

use super::SegmentError;

/// Schemes whose URLs are written with a `//authority` section even when the
/// authority is empty (e.g. `file:///etc/hosts`).
const AUTHORITY_SCHEMES: &[&str] = &[
    "http", "https", "ftp", "sftp", "ws", "wss", "file", "git", "ssh", "rtsp", "nfs",
];

/// A URL decomposed into scheme, authority, path, params, query and fragment.
///
/// `params` is the text after the first `;` of the last path segment, the way
/// the classic six-part split treats it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts {
    pub scheme: String,
    pub authority: String,
    pub path: String,
    pub params: String,
    pub query: String,
    pub fragment: String,
}

impl UrlParts {
    /// Parses `url` with the WHATWG parser and splits it into six parts.
    pub fn parse(url: &str) -> Result<Self, SegmentError> {
        let parsed = url::Url::parse(url.trim()).map_err(|e| SegmentError::malformed(url, e))?;
        if parsed.scheme().is_empty() {
            return Err(SegmentError::malformed(url, "missing scheme"));
        }

        let mut authority = String::new();
        if !parsed.username().is_empty() {
            authority.push_str(parsed.username());
            if let Some(password) = parsed.password() {
                authority.push(':');
                authority.push_str(password);
            }
            authority.push('@');
        }
        if let Some(host) = parsed.host_str() {
            authority.push_str(host);
        }
        if let Some(port) = parsed.port() {
            authority.push(':');
            authority.push_str(&port.to_string());
        }

        let (path, params) = split_params(parsed.path());
        Ok(Self {
            scheme: parsed.scheme().to_string(),
            authority,
            path: path.to_string(),
            params: params.to_string(),
            query: parsed.query().unwrap_or_default().to_string(),
            fragment: parsed.fragment().unwrap_or_default().to_string(),
        })
    }

    fn writes_authority(&self) -> bool {
        !self.authority.is_empty() || AUTHORITY_SCHEMES.contains(&self.scheme.as_str())
    }
}

/// Splits `path;params` at the first `;` after the last `/`.
fn split_params(path: &str) -> (&str, &str) {
    let last_slash = path.rfind('/').unwrap_or(0);
    match path[last_slash..].find(';') {
        Some(offset) => {
            let at = last_slash + offset;
            (&path[..at], &path[at + 1..])
        }
        None => (path, ""),
    }
}

impl fmt::Display for UrlParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scheme)?;
        if self.writes_authority() {
            write!(f, "//{}", self.authority)?;
            if !self.path.is_empty() && !self.path.starts_with('/') {
                f.write_str("/")?;
            }
        }
        f.write_str(&self.path)?;
        if !self.params.is_empty() {
            write!(f, ";{}", self.params)?;
        }
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_six_parts() {
        let parts =
            UrlParts::parse("https://user:pw@cdn.example.com:8080/a/b;p=1;q=2?x=1&y=2#top&s")
                .unwrap();
        assert_eq!(parts.scheme, "https");
        assert_eq!(parts.authority, "user:pw@cdn.example.com:8080");
        assert_eq!(parts.path, "/a/b");
        assert_eq!(parts.params, "p=1;q=2");
        assert_eq!(parts.query, "x=1&y=2");
        assert_eq!(parts.fragment, "top&s");
    }

    #[test]
    fn params_only_from_last_path_segment() {
        assert_eq!(split_params("/a;x/b"), ("/a;x/b", ""));
        assert_eq!(split_params("/a/b;x"), ("/a/b", "x"));
        assert_eq!(split_params("/"), ("/", ""));
    }

    #[test]
    fn relative_url_is_malformed() {
        let err = UrlParts::parse("/just/a/path").unwrap_err();
        assert!(matches!(err, SegmentError::Malformed { .. }));
    }

    #[test]
    fn display_reassembles() {
        let parts = UrlParts {
            scheme: "http".into(),
            authority: "x.com".into(),
            path: "a/b".into(),
            params: "p".into(),
            query: "id=1".into(),
            fragment: "f".into(),
        };
        assert_eq!(parts.to_string(), "http://x.com/a/b;p?id=1#f");
    }

    #[test]
    fn display_without_authority() {
        let parts = UrlParts::parse("mailto:someone@example.com").unwrap();
        assert_eq!(parts.authority, "");
        assert_eq!(parts.to_string(), "mailto:someone@example.com");
    }
}
