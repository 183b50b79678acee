use crate::mapping::ResolverError;

use super::{Access, AccessPolicy, Caller};

/// Builds a caller from gateway-provided identity values.
///
/// A missing or blank subject means the request is anonymous. Groups are a
/// comma-separated list; blank entries are dropped.
pub fn caller_from_parts(subject: Option<&str>, groups: Option<&str>) -> Caller {
    let Some(subject) = subject.map(str::trim).filter(|s| !s.is_empty()) else {
        return Caller::Anonymous;
    };

    let groups = groups
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Caller::User {
        subject: subject.to_string(),
        groups,
    }
}

impl AccessPolicy {
    /// Checks whether `caller` may perform an operation needing `access`.
    pub fn authorize(&self, caller: &Caller, access: Access) -> Result<(), ResolverError> {
        match (self, caller) {
            (Self::Open, _) => Ok(()),
            (Self::UserPool, Caller::User { .. }) => Ok(()),
            (Self::UserPool, Caller::Anonymous) => Err(ResolverError::Unauthorized(format!(
                "{access} access requires an authenticated user"
            ))),
        }
    }
}
