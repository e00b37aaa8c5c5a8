#![cfg(feature = "lambda")]

use httpmock::prelude::*;
use plant_report::core::{BlobStorage, PlantRepository};
use plant_report::{DynamoPlantRepository, ReportError, S3Storage};

fn dynamo_client(endpoint: &str) -> aws_sdk_dynamodb::Client {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};

    let config = aws_sdk_dynamodb::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .endpoint_url(endpoint)
        .build();
    aws_sdk_dynamodb::Client::from_conf(config)
}

fn s3_storage(endpoint: &str) -> S3Storage {
    use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};

    let config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(Credentials::new("test", "test", None, None, "test"))
        .endpoint_url(endpoint)
        .force_path_style(true)
        .build();
    S3Storage::new(
        aws_sdk_s3::Client::from_conf(config),
        "plant-report-bucket".to_string(),
        "us-east-1".to_string(),
        Some(endpoint.to_string()),
    )
}

#[tokio::test]
async fn test_dynamodb_get_plant() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/")
                .header("x-amz-target", "DynamoDB_20120810.GetItem")
                .body_contains(r#""TableName":"PlantTable""#)
                .body_contains(r#""Key":{"PlantID":{"S":"blueberry"}}"#);
            then.status(200)
                .header("Content-Type", "application/x-amz-json-1.0")
                .body(
                    serde_json::json!({
                        "Item": {
                            "PlantID": {"S": "blueberry"},
                            "name": {"S": "Blueberry Bush"},
                            "growing_period": {"S": "6-8 months"},
                            "optimal_planting": {"S": "Spring"},
                            "hardiness_zone": {"S": "5-7"}
                        }
                    })
                    .to_string(),
                );
        })
        .await;

    let repository =
        DynamoPlantRepository::new(dynamo_client(&server.base_url()), "PlantTable".to_string());
    let plant = repository.get_plant("blueberry").await.unwrap();

    mock.assert_async().await;
    assert_eq!(plant.id, "blueberry");
    assert_eq!(plant.name, "Blueberry Bush");
    assert_eq!(plant.hardiness_zone, "5-7");
}

#[tokio::test]
async fn test_dynamodb_missing_item_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200)
                .header("Content-Type", "application/x-amz-json-1.0")
                .body("{}");
        })
        .await;

    let repository =
        DynamoPlantRepository::new(dynamo_client(&server.base_url()), "PlantTable".to_string());
    let result = repository.get_plant("unknown-id").await;

    match result {
        Err(ReportError::NotFound { plant_id }) => assert_eq!(plant_id, "unknown-id"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_dynamodb_service_error_is_backend_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(400)
                .header("Content-Type", "application/x-amz-json-1.0")
                .body(
                    r#"{"__type":"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException","message":"Requested resource not found"}"#,
                );
        })
        .await;

    let repository =
        DynamoPlantRepository::new(dynamo_client(&server.base_url()), "PlantTable".to_string());
    let result = repository.get_plant("blueberry").await;

    match result {
        Err(ReportError::BackendUnavailable { message }) => {
            assert!(message.contains("failed to get item from DynamoDB"))
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_s3_put_object() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(PUT)
                .path("/plant-report-bucket/reports/blueberry-1.pdf");
            then.status(200).header("ETag", "\"9b2cf535f27731c974343645a3985328\"");
        })
        .await;

    let storage = s3_storage(&server.base_url());
    let reference = storage
        .put_object("reports/blueberry-1.pdf", b"%PDF-1.5", "application/pdf")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reference.key, "reports/blueberry-1.pdf");
    assert_eq!(
        reference.url,
        format!(
            "{}/plant-report-bucket/reports/blueberry-1.pdf",
            server.base_url()
        )
    );
}

#[tokio::test]
async fn test_s3_access_denied_is_store_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(PUT);
            then.status(403)
                .header("Content-Type", "application/xml")
                .body(
                    r#"<?xml version="1.0" encoding="UTF-8"?><Error><Code>AccessDenied</Code><Message>Access Denied</Message></Error>"#,
                );
        })
        .await;

    let storage = s3_storage(&server.base_url());
    let result = storage
        .put_object("reports/blueberry-1.pdf", b"%PDF-1.5", "application/pdf")
        .await;

    match result {
        Err(ReportError::StoreError { message }) => assert!(message.contains("AccessDenied")),
        other => panic!("unexpected result: {:?}", other),
    }
}
