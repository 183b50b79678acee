use std::{collections::BTreeMap, env, time::Duration};

use tablegraph_core::auth::AccessPolicy;

/// Prefix of the environment variables that map a logical table to its
/// physical name, e.g. `TABLE_TODO=todo-table`.
const TABLE_ENV_PREFIX: &str = "TABLE_";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bound on every storage call in milliseconds (default: 5000)
    pub storage_timeout_ms: u64,
    /// Policy applied to callers (default: user_pool)
    pub access_policy: AccessPolicy,
    /// Custom DynamoDB endpoint, e.g. a local DynamoDB (default: none)
    pub aws_endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    pub aws_region: String,
    /// Logical table name -> physical table name
    pub table_names: BTreeMap<String, String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `STORAGE_TIMEOUT_MS` - Storage call timeout in milliseconds (default: 5000)
    /// - `ACCESS_POLICY` - `user_pool` or `open` (default: user_pool)
    /// - `AWS_ENDPOINT_URL` - Custom DynamoDB endpoint (default: none)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `TABLE_<NAME>` - Physical name of logical table `<name>`
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self {
            storage_timeout_ms: env::var("STORAGE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0)
                .unwrap_or(5_000),
            access_policy: env::var("ACCESS_POLICY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            table_names: table_overrides(utf8_vars()),
        }
    }

    /// Get the storage timeout as a Duration.
    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Environment variables whose name and value are both valid UTF-8.
///
/// `env::vars` panics on anything else; such entries are skipped instead.
fn utf8_vars() -> impl Iterator<Item = (String, String)> {
    env::vars_os().filter_map(|(name, value)| {
        Some((name.into_string().ok()?, value.into_string().ok()?))
    })
}

/// Collects `TABLE_<NAME>=<physical>` pairs into a logical -> physical map.
///
/// Logical names are lowercased; empty values are ignored.
pub fn table_overrides(vars: impl IntoIterator<Item = (String, String)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(name, value)| {
            let logical = name.strip_prefix(TABLE_ENV_PREFIX)?;
            if logical.is_empty() || value.is_empty() {
                return None;
            }
            Some((logical.to_lowercase(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_storage_timeout_conversion() {
        let config = Config {
            storage_timeout_ms: 250,
            access_policy: AccessPolicy::Open,
            aws_endpoint_url: None,
            aws_region: "us-east-1".to_string(),
            table_names: BTreeMap::new(),
        };

        assert_eq!(config.storage_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_table_overrides() {
        let overrides = table_overrides(vars(&[
            ("TABLE_TODO", "todo-table"),
            ("TABLE_COMMENT", "comment-table"),
            ("TABLE_", "ignored"),
            ("TABLE_DEMO", ""),
            ("PATH", "/usr/bin"),
        ]));

        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("todo").map(String::as_str), Some("todo-table"));
        assert_eq!(
            overrides.get("comment").map(String::as_str),
            Some("comment-table")
        );
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("STORAGE_TIMEOUT_MS");
        env::remove_var("ACCESS_POLICY");
        env::remove_var("AWS_ENDPOINT_URL");
        env::remove_var("AWS_REGION");

        let config = Config::from_env();

        assert_eq!(config.storage_timeout_ms, 5_000);
        assert_eq!(config.access_policy, AccessPolicy::UserPool);
        assert!(config.aws_endpoint_url.is_none());
        assert_eq!(config.aws_region, "us-east-1");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_environment_is_skipped() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let name = "TABLE_UTF8CHECK";
        env::set_var(name, OsString::from_vec(b"bad-\xff-table".to_vec()));
        env::set_var("TABLE_UTF8CHECKOK", "good-table");

        let config = Config::from_env();

        env::remove_var(name);
        env::remove_var("TABLE_UTF8CHECKOK");

        assert!(!config.table_names.contains_key("utf8check"));
        assert_eq!(
            config.table_names.get("utf8checkok").map(String::as_str),
            Some("good-table")
        );
    }
}
