use eyes_types::{
    Ack, CalculateResponse, CaseDetail, CaseQuery, CaseSummary, CreatedCase, Listing,
    Measurements, NewCase, QueueEntry,
};
use reqwest::Method;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::token::TokenStore;

impl<S: TokenStore> ApiClient<S> {
    pub async fn list_cases(&self, query: &CaseQuery) -> Result<Vec<CaseSummary>, ApiError> {
        let opts = RequestOptions::get()
            .query("status", query.status.as_deref())
            .query("patient_id", query.patient_id)
            .query("limit", query.limit)
            .query("offset", query.offset);
        let listing: Listing<CaseSummary> = self.request("/cases", opts).await?;
        Ok(listing.items)
    }

    pub async fn get_case(&self, id: i64) -> Result<CaseDetail, ApiError> {
        self.request(&format!("/cases/{id}"), RequestOptions::get())
            .await
    }

    pub async fn create_case(&self, newCase: &NewCase) -> Result<CreatedCase, ApiError> {
        let opts = RequestOptions::method(Method::POST).json(newCase)?;
        self.request("/cases", opts).await
    }

    pub async fn save_measurements(
        &self,
        caseId: i64,
        measurements: &Measurements,
    ) -> Result<Ack, ApiError> {
        let opts = RequestOptions::method(Method::PUT).json(measurements)?;
        self.request(&format!("/cases/{caseId}/measurements"), opts)
            .await
    }

    /// Asks the backend to run the IOL calculation for a case.
    pub async fn calculate(&self, caseId: i64) -> Result<CalculateResponse, ApiError> {
        self.request(
            &format!("/cases/{caseId}/calculate"),
            RequestOptions::method(Method::POST),
        )
        .await
    }

    pub async fn calc_queue(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<QueueEntry>, ApiError> {
        let opts = RequestOptions::get()
            .query("limit", limit)
            .query("offset", offset);
        let listing: Listing<QueueEntry> = self.request("/cases/calc-queue/list", opts).await?;
        Ok(listing.items)
    }
}
