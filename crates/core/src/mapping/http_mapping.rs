//! Pure functions for mapping resolver errors to HTTP status codes.
//!
//! This module provides HTTP status code mappings for [`ResolverError`] variants,
//! following the Functional Core pattern - pure functions with no side effects.

use super::ResolverError;

/// Maps a [`ResolverError`] to an HTTP status code.
///
/// - `DuplicateKey` -> 409 (Conflict)
/// - `IndexNotDefined` -> 400 (Bad Request)
/// - `ValidationError` -> 400 (Bad Request)
/// - `Unauthorized` -> 401 (Unauthorized)
/// - `StorageUnavailable` -> 503 (Service Unavailable)
///
/// # Examples
///
/// ```
/// use tablegraph_core::mapping::{ResolverError, resolver_error_to_status_code};
///
/// let error = ResolverError::StorageUnavailable("timed out".to_string());
/// assert_eq!(resolver_error_to_status_code(&error), 503);
/// ```
pub fn resolver_error_to_status_code(error: &ResolverError) -> u16 {
    match error {
        ResolverError::DuplicateKey { .. } => 409,
        ResolverError::IndexNotDefined { .. } => 400,
        ResolverError::ValidationError(_) => 400,
        ResolverError::Unauthorized(_) => 401,
        ResolverError::StorageUnavailable(_) => 503,
    }
}
