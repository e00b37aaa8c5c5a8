use crate::domain::model::{Location, PlantRecord, RenderedReport, StoredReportReference};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PlantRepository: Send + Sync {
    /// Point read by plant identifier. Never cached.
    async fn get_plant(&self, plant_id: &str) -> Result<PlantRecord>;
}

pub trait ReportRenderer: Send + Sync {
    fn render(&self, location: &Location, plant: &PlantRecord) -> Result<RenderedReport>;
}

pub trait BlobStorage: Send + Sync {
    fn put_object(
        &self,
        key: &str,
        data: &[u8],
        content_type: &str,
    ) -> impl std::future::Future<Output = Result<StoredReportReference>> + Send;
}
