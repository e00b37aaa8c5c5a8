pub mod report;
pub mod request;

pub use crate::domain::model::{
    Location, PlantRecord, RenderedReport, ReportRequest, ReportResponse, StoredReportReference,
};
pub use crate::domain::ports::{BlobStorage, PlantRepository, ReportRenderer};
pub use crate::utils::error::Result;
