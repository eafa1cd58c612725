use crate::{
    core::{LinkRepository, ShortLink},
    error::ServiceError,
};
use async_trait::async_trait;
use aws_sdk_dynamodb::{
    types::{AttributeValue, ReturnValue},
    Client,
};
use std::collections::HashMap;

#[derive(Debug)]
pub struct DynamoDbLinkRepository {
    table_name: String,
    dynamodb_client: Client,
}

impl DynamoDbLinkRepository {
    pub fn new(table_name: String, dynamodb_client: Client) -> Self {
        Self {
            table_name,
            dynamodb_client,
        }
    }
}

#[async_trait]
impl LinkRepository for DynamoDbLinkRepository {
    async fn insert_if_absent(&self, link: &ShortLink, now: u64) -> Result<bool, ServiceError> {
        // An expired record may linger until TTL deletion catches up, its key is reusable.
        let result = self
            .dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .item("short_key", AttributeValue::S(link.short_key.clone()))
            .item("url", AttributeValue::S(link.url.clone()))
            .item("counter", AttributeValue::N(link.counter.to_string()))
            .item("ttl", AttributeValue::N(link.expires_at.to_string()))
            .condition_expression("attribute_not_exists(short_key) OR #ttl <= :now")
            .expression_attribute_names("#ttl", "ttl")
            .expression_attribute_values(":now", AttributeValue::N(now.to_string()))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) => {
                let generic_err_msg = format!("Error adding item: {:?}", e);
                if e.into_service_error().is_conditional_check_failed_exception() {
                    Ok(false)
                } else {
                    Err(ServiceError::StoreUnavailable(generic_err_msg))
                }
            }
        }
    }

    async fn resolve_and_increment(
        &self,
        short_key: &str,
        now: u64,
    ) -> Result<Option<ShortLink>, ServiceError> {
        let result = self
            .dynamodb_client
            .update_item()
            .table_name(&self.table_name)
            .key("short_key", AttributeValue::S(short_key.to_string()))
            .update_expression("SET #counter = if_not_exists(#counter, :zero) + :val")
            .condition_expression("attribute_exists(short_key) AND #ttl > :now")
            .expression_attribute_names("#counter", "counter")
            .expression_attribute_names("#ttl", "ttl")
            .expression_attribute_values(":val", AttributeValue::N("1".to_string()))
            .expression_attribute_values(":zero", AttributeValue::N("0".to_string()))
            .expression_attribute_values(":now", AttributeValue::N(now.to_string()))
            .return_values(ReturnValue::AllNew)
            .send()
            .await;

        match result {
            Err(e) => {
                let generic_err_msg = format!("Error incrementing counter: {:?}", e);
                if e.into_service_error().is_conditional_check_failed_exception() {
                    Ok(None)
                } else {
                    Err(ServiceError::StoreUnavailable(generic_err_msg))
                }
            }
            Ok(output) => output
                .attributes
                .map(ShortLink::try_from)
                .transpose()
                .map_err(ServiceError::StoreUnavailable),
        }
    }
}

impl TryFrom<HashMap<String, AttributeValue>> for ShortLink {
    type Error = String;

    fn try_from(item: HashMap<String, AttributeValue>) -> Result<Self, Self::Error> {
        let short_key = item
            .get("short_key")
            .ok_or_else(|| "short_key not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "short_key is not a String".to_string())?;
        let url = item
            .get("url")
            .ok_or_else(|| "url not found".to_string())?
            .as_s()
            .map(|s| s.to_string())
            .map_err(|_| "url is not a String".to_string())?;
        let counter = match item.get("counter") {
            None => 0,
            Some(value) => value
                .as_n()
                .map_err(|_| "counter is not a number".to_string())
                .and_then(|n| {
                    n.parse::<u64>()
                        .map_err(|_| "Cannot convert counter into u64".to_string())
                })?,
        };
        let expires_at = item
            .get("ttl")
            .ok_or_else(|| "ttl not found".to_string())?
            .as_n()
            .map_err(|_| "ttl is not a number".to_string())
            .and_then(|n| {
                n.parse::<u64>()
                    .map_err(|_| "Cannot convert ttl into u64".to_string())
            })?;

        Ok(ShortLink {
            short_key,
            url,
            counter,
            expires_at,
        })
    }
}
