use crate::core::report::HandlerOutcome;
use crate::utils::error::Result;
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use aws_lambda_events::encodings::Body;
use http::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

pub fn to_proxy_response(outcome: &HandlerOutcome) -> Result<ApiGatewayProxyResponse> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    Ok(ApiGatewayProxyResponse {
        status_code: i64::from(outcome.status_code),
        headers,
        body: Some(Body::Text(serde_json::to_string(&outcome.body)?)),
        ..Default::default()
    })
}
