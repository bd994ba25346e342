//! Input validators
//!
//! Pure predicates over the user-supplied strings, except
//! [`target_dir`] which creates the directory tree when it is missing.
//! Values are returned unchanged on success, never coerced.

use regex::Regex;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use thiserror::Error;

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("identifier regex is valid"));

static HTTP_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("url regex is valid"));

static ORG_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)*$")
        .expect("org id regex is valid")
});

/// Validation failure with a human-readable message.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} may only contain letters, digits and underscores")]
    InvalidIdentifier { field: &'static str },

    #[error("'{0}' is not a valid IP address or http(s):// URL")]
    InvalidUrl(String),

    #[error("'{0}' is not a valid identifier; use a reverse-domain form like com.example.app")]
    InvalidOrgId(String),

    #[error("cannot create directory '{path}': {source}")]
    TargetDir {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn identifier<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    if IDENTIFIER_RE.is_match(value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidIdentifier { field })
    }
}

/// Project names: non-empty, ASCII letters, digits and underscores only.
pub fn project_name(value: &str) -> Result<&str, ValidationError> {
    identifier(value, "project name")
}

/// Database names share the project-name character set.
pub fn db_name(value: &str) -> Result<&str, ValidationError> {
    identifier(value, "database name")
}

/// API endpoints: either an IPv4/IPv6 literal or a scheme-anchored
/// http(s) URL. Bare hostnames without a scheme are rejected.
pub fn api_url(value: &str) -> Result<&str, ValidationError> {
    if value.parse::<IpAddr>().is_ok() || HTTP_URL_RE.is_match(value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidUrl(value.to_string()))
    }
}

/// Reverse-domain package/bundle identifiers (e.g. `com.example.app`).
pub fn org_id(value: &str) -> Result<&str, ValidationError> {
    if ORG_ID_RE.is_match(value) {
        Ok(value)
    } else {
        Err(ValidationError::InvalidOrgId(value.to_string()))
    }
}

/// Target directory: accepted if it exists or can be created, ancestors
/// included. The underlying OS error is carried on failure.
pub fn target_dir(value: &str) -> Result<PathBuf, ValidationError> {
    let path = Path::new(value);
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|source| ValidationError::TargetDir {
            path: value.to_string(),
            source,
        })?;
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_identifier_accepts_letters_digits_underscores() {
        for name in ["demo_app", "Demo123", "_private", "a", "UPPER_case_9"] {
            assert_eq!(project_name(name).unwrap(), name);
            assert_eq!(db_name(name).unwrap(), name);
        }
    }

    #[test]
    fn test_identifier_rejects_anything_else() {
        for name in ["", "demo-app", "demo app", "demo.app", "démo", "app!"] {
            assert!(project_name(name).is_err(), "accepted {name:?}");
            assert!(db_name(name).is_err(), "accepted {name:?}");
        }
    }

    #[test]
    fn test_api_url_accepts_ip_literals() {
        for url in ["127.0.0.1", "10.0.0.254", "::1", "2001:db8::8a2e:370:7334"] {
            assert_eq!(api_url(url).unwrap(), url);
        }
    }

    #[test]
    fn test_api_url_accepts_scheme_anchored_urls() {
        for url in [
            "http://localhost:8080",
            "https://api.dev.example.com",
            "https://api.example.com/v1?env=dev",
        ] {
            assert_eq!(api_url(url).unwrap(), url);
        }
    }

    #[test]
    fn test_api_url_rejects_bare_hostnames_and_other_schemes() {
        for url in [
            "example.com",
            "ftp://example.com",
            "https://",
            "https:// example.com",
            "localhost",
            "",
        ] {
            assert!(api_url(url).is_err(), "accepted {url:?}");
        }
    }

    #[test]
    fn test_org_id_accepts_reverse_domain_identifiers() {
        for id in ["com.example.app", "com.demo_1.app", "app", "a.b.c.d"] {
            assert_eq!(org_id(id).unwrap(), id);
        }
    }

    #[test]
    fn test_org_id_rejects_malformed_identifiers() {
        for id in ["", ".com.example", "com..app", "com.example.", "1com.app", "com.2app"] {
            assert!(org_id(id).is_err(), "accepted {id:?}");
        }
    }

    #[test]
    fn test_target_dir_creates_missing_ancestors() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let nested = tmp.path().join("a/b/c");
        let nested_str = nested.to_str().unwrap();

        let created = target_dir(nested_str).unwrap();
        assert_eq!(created, nested);
        assert!(nested.is_dir());

        // Existing directory is accepted as-is.
        assert_eq!(target_dir(nested_str).unwrap(), nested);
    }

    #[test]
    fn test_target_dir_reports_the_os_error() {
        let tmp = TempDir::new().expect("failed to create temp dir");
        let file = tmp.path().join("occupied");
        std::fs::write(&file, "x").unwrap();

        // A file occupies the path, so a directory cannot be created under it.
        let err = target_dir(file.join("sub").to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ValidationError::TargetDir { .. }));
        assert!(err.to_string().contains("cannot create directory"));
    }
}
