//! Read-only access to the Provider's advertiser reports.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::client::{HttpMethod, ProviderClient};
use crate::error::IntegrationError;
use crate::wire::reporting::{
    ConversionReportRequest, ConversionReportResponse, EntityReportRequest, EntityReportResponse,
};
use crate::wire::WireBody;

pub const ENTITY_REPORT_PATH: &str = "/advertisers/reporting/entity";
pub const CONVERSION_REPORT_PATH: &str = "/advertisers/reporting/conversions";

pub struct ReportingClient {
    client: Option<Arc<dyn ProviderClient>>,
}

impl ReportingClient {
    pub fn new(client: Option<Arc<dyn ProviderClient>>) -> Self {
        Self { client }
    }

    async fn post<Req: WireBody, Resp: WireBody>(
        &self,
        path: &str,
        request: &Req,
        cancel: &CancellationToken,
    ) -> Result<Resp, IntegrationError> {
        let client = self.client.as_ref().ok_or(IntegrationError::ProviderDisabled)?;
        let response = client
            .call(HttpMethod::Post, path, Some(request.encode()?), cancel)
            .await?;
        Ok(Resp::decode(&response.body)?)
    }

    pub async fn entity_report(
        &self,
        request: &EntityReportRequest,
        cancel: &CancellationToken,
    ) -> Result<EntityReportResponse, IntegrationError> {
        let report: EntityReportResponse = self.post(ENTITY_REPORT_PATH, request, cancel).await?;
        info!(rows = report.table.len(), from = %request.from, to = %request.to, "[REPORTING] Entity report fetched");
        Ok(report)
    }

    pub async fn conversion_report(
        &self,
        request: &ConversionReportRequest,
        cancel: &CancellationToken,
    ) -> Result<ConversionReportResponse, IntegrationError> {
        let report: ConversionReportResponse =
            self.post(CONVERSION_REPORT_PATH, request, cancel).await?;
        info!(conversions = report.conversions.len(), "[REPORTING] Conversion report fetched");
        Ok(report)
    }
}
