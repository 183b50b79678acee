//! Request execution against a storage backend (Imperative Shell).

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use uuid::Uuid;

use tablegraph_core::auth::{AccessPolicy, Caller};
use tablegraph_core::mapping::{build_item, resolve_index, Operation, Request, ResolverError, Response};
use tablegraph_core::schema::{Catalog, TableSchema};
use tablegraph_core::storage::{self, Key, StorageBackend};

/// Default bound on a single storage call.
pub const DEFAULT_STORAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Key looked up by the storage health check. Nothing is expected to live there.
const HEALTH_CHECK_KEY: &str = "__tablegraph_health__";

/// Executes requests against the tables of a catalog.
///
/// The engine holds no per-request state; one instance serves any number of
/// concurrent requests.
pub struct MappingEngine {
    catalog: Arc<Catalog>,
    storage: Arc<dyn StorageBackend>,
    policy: AccessPolicy,
    timeout: Duration,
}

impl MappingEngine {
    pub fn new(catalog: Arc<Catalog>, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            catalog,
            storage,
            policy: AccessPolicy::default(),
            timeout: DEFAULT_STORAGE_TIMEOUT,
        }
    }

    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> AccessPolicy {
        self.policy
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Executes one request on behalf of `caller`.
    ///
    /// The caller is authorized before storage is touched. Every storage call
    /// is bounded by the configured timeout.
    pub async fn execute(&self, caller: &Caller, request: Request) -> Result<Response, ResolverError> {
        let started = Instant::now();
        let operation = request.operation.kind();
        let table = request.table.clone();

        let result = self.dispatch(caller, request).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(response) => tracing::debug!(
                %operation,
                %table,
                caller = caller.subject().unwrap_or("anonymous"),
                items = response.len(),
                elapsed_ms,
                "request succeeded"
            ),
            Err(err) if err.is_transient() => tracing::warn!(
                %operation,
                %table,
                caller = caller.subject().unwrap_or("anonymous"),
                error = %err,
                kind = err.kind(),
                elapsed_ms,
                "request failed"
            ),
            Err(err) => tracing::info!(
                %operation,
                %table,
                caller = caller.subject().unwrap_or("anonymous"),
                error = %err,
                kind = err.kind(),
                elapsed_ms,
                "request rejected"
            ),
        }

        result
    }

    async fn dispatch(&self, caller: &Caller, request: Request) -> Result<Response, ResolverError> {
        let schema = self.table(&request.table)?;
        self.policy.authorize(caller, request.operation.access())?;

        match request.operation {
            Operation::List => {
                let items = self.bounded(self.storage.scan(schema)).await?;
                Ok(Response::Items(items))
            }
            Operation::Insert { fields } => {
                let (key, item) = build_item(schema, fields, || Uuid::new_v4().to_string())?;

                if self.bounded(self.storage.put_if_absent(schema, &item)).await? {
                    Ok(Response::Item(item))
                } else {
                    Err(ResolverError::DuplicateKey {
                        table: schema.name.clone(),
                        key,
                    })
                }
            }
            Operation::QueryByIndex {
                index_field,
                index_value,
            } => {
                let index = resolve_index(schema, &index_field)?;
                let items = self
                    .bounded(self.storage.query_index(schema, &index.name, &index_value))
                    .await?;
                Ok(Response::Items(items))
            }
        }
    }

    /// Checks that storage answers for every catalog table.
    ///
    /// Performs a point lookup of a key that is never written.
    /// The sweep as a whole shares one storage timeout, so a slow backend
    /// fails the check within that bound however many tables there are.
    pub async fn check_storage(&self) -> Result<(), ResolverError> {
        self.bounded(async {
            for schema in self.catalog.tables() {
                let key = Key {
                    partition: HEALTH_CHECK_KEY.to_string(),
                    sort: schema.sort_key.as_ref().map(|_| HEALTH_CHECK_KEY.to_string()),
                };
                self.storage.get(schema, &key).await?;
            }
            Ok(())
        })
        .await
    }

    fn table(&self, name: &str) -> Result<&TableSchema, ResolverError> {
        self.catalog
            .table(name)
            .ok_or_else(|| ResolverError::ValidationError(format!("unknown table: {name}")))
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = storage::Result<T>>,
    ) -> Result<T, ResolverError> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result.map_err(ResolverError::from),
            Err(_) => Err(ResolverError::StorageUnavailable(format!(
                "storage call timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}
