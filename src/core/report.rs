use crate::core::request::{decode_body, parse_report_request, CoordinatePolicy};
use crate::core::{BlobStorage, PlantRepository, ReportRenderer};
use crate::domain::model::{ReportRequest, ReportResponse, StoredReportReference};
use crate::utils::error::{ReportError, Result};
use uuid::Uuid;

pub const SUCCESS_MESSAGE: &str = "PDF report generated successfully";

const MAX_KEY_STEM_LEN: usize = 64;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub report_prefix: String,
    pub coordinate_policy: CoordinatePolicy,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            report_prefix: "reports".to_string(),
            coordinate_policy: CoordinatePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOutcome {
    pub status_code: u16,
    pub body: ReportResponse,
}

impl HandlerOutcome {
    fn success(reference: StoredReportReference) -> Self {
        Self {
            status_code: 200,
            body: ReportResponse {
                message: SUCCESS_MESSAGE.to_string(),
                pdf_url: Some(reference.url),
                error: None,
            },
        }
    }

    fn failure(error: &ReportError) -> Self {
        Self {
            status_code: error.status_code(),
            body: ReportResponse {
                message: error.user_friendly_message().to_string(),
                pdf_url: None,
                error: Some(error.kind().to_string()),
            },
        }
    }
}

/// Builds a unique object key so concurrent reports never overwrite each other.
pub fn object_key(prefix: &str, plant_id: &str) -> String {
    let stem: String = plant_id
        .chars()
        .take(MAX_KEY_STEM_LEN)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        format!("{}-{}.pdf", stem, Uuid::new_v4())
    } else {
        format!("{}/{}-{}.pdf", prefix, stem, Uuid::new_v4())
    }
}

pub struct ReportEngine<R: PlantRepository, P: ReportRenderer, S: BlobStorage> {
    repository: R,
    renderer: P,
    storage: S,
    settings: EngineSettings,
}

impl<R: PlantRepository, P: ReportRenderer, S: BlobStorage> ReportEngine<R, P, S> {
    pub fn new(repository: R, renderer: P, storage: S, settings: EngineSettings) -> Self {
        Self {
            repository,
            renderer,
            storage,
            settings,
        }
    }

    /// Lookup, render and store for an already validated request.
    pub async fn run(&self, request: &ReportRequest) -> Result<StoredReportReference> {
        tracing::debug!("Looking up plant {}", request.plant_id);
        let plant = self.repository.get_plant(&request.plant_id).await?;

        tracing::debug!("Rendering report for {}", plant.name);
        let report = self.renderer.render(&request.location, &plant)?;
        tracing::debug!("Rendered report ({} bytes)", report.len());

        let key = object_key(&self.settings.report_prefix, &request.plant_id);
        let reference = self
            .storage
            .put_object(&key, &report.bytes, report.content_type())
            .await?;

        tracing::info!("Report uploaded to: {}", reference.url);
        Ok(reference)
    }

    async fn process(
        &self,
        body: Option<&str>,
        is_base64_encoded: bool,
    ) -> Result<StoredReportReference> {
        let body = decode_body(body, is_base64_encoded)?;
        let request = parse_report_request(&body, self.settings.coordinate_policy)?;
        self.run(&request).await
    }

    /// Full request cycle from the raw transport body to the response.
    pub async fn handle(&self, body: Option<&str>, is_base64_encoded: bool) -> HandlerOutcome {
        match self.process(body, is_base64_encoded).await {
            Ok(reference) => HandlerOutcome::success(reference),
            Err(e) => {
                if e.is_client_error() {
                    tracing::warn!("Rejected request: {}", e);
                } else {
                    tracing::error!("Report generation failed: {}", e);
                }
                HandlerOutcome::failure(&e)
            }
        }
    }
}
