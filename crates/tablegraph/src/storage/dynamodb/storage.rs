//! DynamoDB storage implementation.
//!
//! Implements `StorageBackend` from `tablegraph_core::storage` using DynamoDB.
//! Each logical table maps onto one physical DynamoDB table, and each
//! secondary index onto a global secondary index of the same name.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use tablegraph_core::schema::TableSchema;
use tablegraph_core::storage::{Item, Key, Result, StorageBackend, StorageError};

use super::conversions::{attributes_to_item, item_to_attributes, key_to_attributes};
use super::error::{conditional_put_outcome, map_get_item_error, map_query_error, map_scan_error};
use crate::config::Config;

type AttributeMap = HashMap<String, AttributeValue>;

/// DynamoDB-based storage backend.
pub struct DynamoDbStorage {
    client: Client,
    /// Logical table name -> physical table name
    table_names: BTreeMap<String, String>,
}

impl DynamoDbStorage {
    /// Creates a new backend with the given DynamoDB client.
    ///
    /// Logical table names are used as physical names until overridden.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            table_names: BTreeMap::new(),
        }
    }

    /// Overrides the physical names of logical tables.
    pub fn with_table_names(mut self, table_names: BTreeMap<String, String>) -> Self {
        self.table_names = table_names;
        self
    }

    /// Creates a backend from application configuration.
    ///
    /// Uses the AWS SDK default credential chain. `AWS_ENDPOINT_URL` points the
    /// client at a local DynamoDB when set.
    pub async fn from_config(config: &Config) -> Self {
        let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()));

        if let Some(endpoint) = &config.aws_endpoint_url {
            sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
        }

        let sdk_config = sdk_config_loader.load().await;

        Self::new(Client::new(&sdk_config)).with_table_names(config.table_names.clone())
    }

    /// Physical DynamoDB table name for a logical table.
    pub fn physical_name<'a>(&'a self, table: &'a TableSchema) -> &'a str {
        self.table_names
            .get(&table.name)
            .map(String::as_str)
            .unwrap_or(&table.name)
    }

    fn to_items(items: Vec<AttributeMap>, out: &mut Vec<Item>) -> Result<()> {
        for item in &items {
            out.push(attributes_to_item(item)?);
        }
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for DynamoDbStorage {
    async fn get(&self, table: &TableSchema, key: &Key) -> Result<Option<Item>> {
        let physical = self.physical_name(table);

        let result = self
            .client
            .get_item()
            .table_name(physical)
            .set_key(Some(key_to_attributes(table, key)))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| map_get_item_error(e.into_service_error(), physical))?;

        match result.item {
            Some(item) => Ok(Some(attributes_to_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_if_absent(&self, table: &TableSchema, item: &Item) -> Result<bool> {
        let physical = self.physical_name(table);

        // Fail fast on a keyless item; DynamoDB would reject it anyway.
        table
            .key_of(item)
            .map_err(|e| StorageError::InvalidData(e.to_string()))?;

        let result = self
            .client
            .put_item()
            .table_name(physical)
            .set_item(Some(item_to_attributes(item)))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", &table.partition_key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(err) => conditional_put_outcome(err.into_service_error(), physical),
        }
    }

    async fn scan(&self, table: &TableSchema) -> Result<Vec<Item>> {
        let physical = self.physical_name(table);
        let mut items = Vec::new();
        let mut start_key: Option<AttributeMap> = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(physical)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| map_scan_error(e.into_service_error(), physical))?;

            Self::to_items(result.items.unwrap_or_default(), &mut items)?;

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn query_index(
        &self,
        table: &TableSchema,
        index_name: &str,
        value: &str,
    ) -> Result<Vec<Item>> {
        let Some(index) = table.index(index_name) else {
            return Err(StorageError::IndexNotFound {
                table: table.name.clone(),
                index: index_name.to_string(),
            });
        };

        let physical = self.physical_name(table);
        let mut items = Vec::new();
        let mut start_key: Option<AttributeMap> = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(physical)
                .index_name(&index.name)
                .key_condition_expression("#k = :v")
                .expression_attribute_names("#k", &index.partition_key)
                .expression_attribute_values(":v", AttributeValue::S(value.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| map_query_error(e.into_service_error(), physical))?;

            Self::to_items(result.items.unwrap_or_default(), &mut items)?;

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }
}
