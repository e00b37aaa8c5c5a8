use aws_config::BehaviorVersion;
use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use plant_report::adapters::apigw;
use plant_report::utils::{logger, validation::Validate};
use plant_report::{
    AppConfig, DynamoPlantRepository, LocalStorage, PdfReportRenderer, ReportEngine, S3Storage,
    StorageBackend,
};
use std::sync::Arc;
use tracing::Instrument;

type Engine = ReportEngine<DynamoPlantRepository, PdfReportRenderer, StorageBackend>;

async fn function_handler(
    engine: &Engine,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let (request, context) = event.into_parts();
    let span = tracing::info_span!("plant_report", request_id = %context.request_id);

    let outcome = engine
        .handle(request.body.as_deref(), request.is_base64_encoded)
        .instrument(span)
        .await;

    tracing::info!("Responding with status {}", outcome.status_code);
    Ok(apigw::to_proxy_response(&outcome)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    if std::env::var_os("AWS_LAMBDA_FUNCTION_NAME").is_some() {
        logger::init_lambda_logger();
    } else {
        logger::init_local_logger();
    }

    let config = AppConfig::from_env()?;
    config.validate()?;

    // Clients are built once per cold start and shared by every invocation.
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let repository =
        DynamoPlantRepository::new(DynamoClient::new(&sdk_config), config.table_name.clone());

    let storage = match &config.report_storage_dir {
        Some(dir) => {
            tracing::info!("Writing reports to local directory {}", dir);
            StorageBackend::Local(LocalStorage::new(dir))
        }
        None => StorageBackend::S3(S3Storage::from_sdk_config(
            &sdk_config,
            config.bucket_name.clone(),
            config.s3_region.clone(),
            config.s3_endpoint.clone(),
        )),
    };

    let engine = Arc::new(ReportEngine::new(
        repository,
        PdfReportRenderer::new(),
        storage,
        config.engine_settings(),
    ));

    tracing::info!(
        "Plant report function ready (table: {}, bucket: {})",
        config.table_name,
        config.bucket_name
    );

    run(service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| {
        let engine = Arc::clone(&engine);
        async move { function_handler(&engine, event).await }
    }))
    .await
}
