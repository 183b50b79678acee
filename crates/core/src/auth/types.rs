use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of whoever issued a request.
///
/// The engine never reads identity from ambient state; every call receives
/// one of these explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Caller {
    Anonymous,
    User {
        subject: String,
        #[serde(default)]
        groups: Vec<String>,
    },
}

impl Caller {
    pub fn user(subject: impl Into<String>) -> Self {
        Self::User {
            subject: subject.into(),
            groups: Vec::new(),
        }
    }

    /// Subject identifier, or `None` for anonymous callers.
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::User { subject, .. } => Some(subject),
            Self::Anonymous => None,
        }
    }
}

/// Kind of access an operation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// Who may do what.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessPolicy {
    /// Any authenticated user may read and write; anonymous callers are rejected.
    #[default]
    UserPool,
    /// Everything is allowed.
    Open,
}

impl fmt::Display for AccessPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserPool => write!(f, "user_pool"),
            Self::Open => write!(f, "open"),
        }
    }
}

impl FromStr for AccessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user_pool" | "userpool" => Ok(Self::UserPool),
            "open" => Ok(Self::Open),
            other => Err(format!("unknown access policy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caller_subject() {
        assert_eq!(Caller::user("alice").subject(), Some("alice"));
        assert_eq!(Caller::Anonymous.subject(), None);
    }

    #[test]
    fn test_access_policy_from_str() {
        assert_eq!("user_pool".parse(), Ok(AccessPolicy::UserPool));
        assert_eq!("UserPool".parse(), Ok(AccessPolicy::UserPool));
        assert_eq!(" open ".parse(), Ok(AccessPolicy::Open));
        assert!("iam".parse::<AccessPolicy>().is_err());
    }

    #[test]
    fn test_access_policy_display_round_trips() {
        for policy in [AccessPolicy::UserPool, AccessPolicy::Open] {
            assert_eq!(policy.to_string().parse(), Ok(policy));
        }
    }
}
