use crate::core::{PlantRecord, PlantRepository};
use crate::utils::error::{ReportError, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;

pub const PARTITION_KEY: &str = "PlantID";

#[derive(Debug, Clone)]
pub struct DynamoPlantRepository {
    client: DynamoClient,
    table_name: String,
}

impl DynamoPlantRepository {
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

fn string_attribute(item: &HashMap<String, AttributeValue>, name: &str) -> Result<String> {
    item.get(name)
        .and_then(|value| value.as_s().ok())
        .cloned()
        .ok_or_else(|| ReportError::BackendUnavailable {
            message: format!("plant item has no string attribute '{}'", name),
        })
}

pub fn plant_from_item(item: &HashMap<String, AttributeValue>) -> Result<PlantRecord> {
    Ok(PlantRecord {
        id: string_attribute(item, PARTITION_KEY)?,
        name: string_attribute(item, "name")?,
        growing_period: string_attribute(item, "growing_period")?,
        optimal_planting: string_attribute(item, "optimal_planting")?,
        hardiness_zone: string_attribute(item, "hardiness_zone")?,
    })
}

#[async_trait]
impl PlantRepository for DynamoPlantRepository {
    async fn get_plant(&self, plant_id: &str) -> Result<PlantRecord> {
        tracing::debug!("GetItem {} from table {}", plant_id, self.table_name);

        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(plant_id.to_string()))
            .send()
            .await
            .map_err(|e| ReportError::BackendUnavailable {
                message: format!("failed to get item from DynamoDB: {}", DisplayErrorContext(&e)),
            })?;

        match output.item {
            Some(item) => plant_from_item(&item),
            None => Err(ReportError::NotFound {
                plant_id: plant_id.to_string(),
            }),
        }
    }
}
