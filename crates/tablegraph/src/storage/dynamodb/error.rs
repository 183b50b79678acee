//! DynamoDB error mapping.
//!
//! Maps AWS SDK service errors to `StorageError` from `tablegraph_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::ProvideErrorMetadata;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::scan::ScanError;
use tablegraph_core::storage::StorageError;

/// Errors DynamoDB does not model per operation (validation, throttling of
/// the account, auth) arrive as unhandled variants carrying an error code.
/// A `ValidationException` means the request itself is wrong.
fn map_unmodeled_error<E>(err: E, operation: &str) -> StorageError
where
    E: ProvideErrorMetadata + Debug,
{
    match err.code() {
        Some("ValidationException") => StorageError::InvalidRequest(
            err.message()
                .unwrap_or("request rejected by DynamoDB")
                .to_string(),
        ),
        _ => StorageError::Unavailable(format!("{operation} failed: {:?}", err)),
    }
}

/// Map a GetItem service error to StorageError.
pub fn map_get_item_error(err: GetItemError, table: &str) -> StorageError {
    match err {
        GetItemError::ResourceNotFoundException(_) => StorageError::TableNotFound(table.to_string()),
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => map_unmodeled_error(err, "GetItem"),
    }
}

/// Outcome of a conditional put that failed.
///
/// A failed `attribute_not_exists` condition means the key is taken, which
/// `put_if_absent` reports as `Ok(false)`. Anything else is an error.
pub fn conditional_put_outcome(err: PutItemError, table: &str) -> Result<bool, StorageError> {
    if err.is_conditional_check_failed_exception() {
        Ok(false)
    } else {
        Err(map_put_item_error(err, table))
    }
}

/// Map a PutItem service error to StorageError.
pub fn map_put_item_error(err: PutItemError, table: &str) -> StorageError {
    match err {
        PutItemError::ResourceNotFoundException(_) => StorageError::TableNotFound(table.to_string()),
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        PutItemError::ItemCollectionSizeLimitExceededException(_) => {
            StorageError::InvalidRequest("Item collection size limit exceeded".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StorageError::Unavailable("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => map_unmodeled_error(err, "PutItem"),
    }
}

/// Map a Scan service error to StorageError.
pub fn map_scan_error(err: ScanError, table: &str) -> StorageError {
    match err {
        ScanError::ResourceNotFoundException(_) => StorageError::TableNotFound(table.to_string()),
        ScanError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        ScanError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        ScanError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => map_unmodeled_error(err, "Scan"),
    }
}

/// Map a Query service error to StorageError.
pub fn map_query_error(err: QueryError, table: &str) -> StorageError {
    match err {
        QueryError::ResourceNotFoundException(_) => StorageError::TableNotFound(table.to_string()),
        QueryError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => map_unmodeled_error(err, "Query"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, InternalServerError, ProvisionedThroughputExceededException,
        ResourceNotFoundException,
    };

    fn validation_error() -> ErrorMetadata {
        ErrorMetadata::builder()
            .code("ValidationException")
            .message("Item size has exceeded the maximum allowed size")
            .build()
    }

    #[test]
    fn test_conditional_check_failure_means_key_taken() {
        let err = PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder()
                .message("The conditional request failed")
                .build(),
        );

        assert_eq!(conditional_put_outcome(err, "todo-table"), Ok(false));
    }

    #[test]
    fn test_conditional_put_other_errors_propagate() {
        let err = PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder().build(),
        );

        assert_eq!(
            conditional_put_outcome(err, "todo-table"),
            Err(StorageError::TableNotFound("todo-table".to_string()))
        );
    }

    #[test]
    fn test_put_validation_exception_is_invalid_request() {
        let err = PutItemError::generic(validation_error());

        assert_eq!(
            map_put_item_error(err, "todo-table"),
            StorageError::InvalidRequest(
                "Item size has exceeded the maximum allowed size".to_string()
            )
        );
    }

    #[test]
    fn test_put_throughput_exceeded_is_unavailable() {
        let err = PutItemError::ProvisionedThroughputExceededException(
            ProvisionedThroughputExceededException::builder().build(),
        );

        assert_eq!(
            map_put_item_error(err, "todo-table"),
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        );
    }

    #[test]
    fn test_get_item_errors() {
        assert_eq!(
            map_get_item_error(
                GetItemError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
                "todo-table"
            ),
            StorageError::TableNotFound("todo-table".to_string())
        );
        assert_eq!(
            map_get_item_error(
                GetItemError::InternalServerError(InternalServerError::builder().build()),
                "todo-table"
            ),
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        );
    }

    #[test]
    fn test_scan_validation_exception_is_invalid_request() {
        assert!(matches!(
            map_scan_error(ScanError::generic(validation_error()), "todo-table"),
            StorageError::InvalidRequest(_)
        ));
    }

    #[test]
    fn test_query_errors() {
        assert!(matches!(
            map_query_error(QueryError::generic(validation_error()), "comment-table"),
            StorageError::InvalidRequest(_)
        ));
        assert_eq!(
            map_query_error(
                QueryError::ResourceNotFoundException(ResourceNotFoundException::builder().build()),
                "comment-table"
            ),
            StorageError::TableNotFound("comment-table".to_string())
        );
    }

    #[test]
    fn test_unknown_unmodeled_error_is_unavailable() {
        let err = QueryError::generic(
            ErrorMetadata::builder()
                .code("ThrottlingException")
                .message("Rate exceeded")
                .build(),
        );

        assert!(matches!(
            map_query_error(err, "comment-table"),
            StorageError::Unavailable(_)
        ));
    }
}
