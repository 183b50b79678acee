//! Axum extractor for RequestContext.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use tablegraph_core::auth::{caller_from_parts, Caller};
use uuid::Uuid;

use super::types::{RequestContext, RequestId};

/// Header carrying the authenticated subject, set by the gateway.
const CALLER_SUB_HEADER: &str = "x-caller-sub";
/// Header carrying the caller's comma-separated groups.
const CALLER_GROUPS_HEADER: &str = "x-caller-groups";

fn extract_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(RequestId::from_uuid)
        .unwrap_or_else(RequestId::new)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn extract_caller(headers: &HeaderMap) -> Caller {
    caller_from_parts(
        header(headers, CALLER_SUB_HEADER),
        header(headers, CALLER_GROUPS_HEADER),
    )
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(RequestContext {
            caller: extract_caller(&parts.headers),
            request_id: extract_request_id(&parts.headers),
        })
    }
}
