use eyes_types::DashboardSummary;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::token::TokenStore;

impl<S: TokenStore> ApiClient<S> {
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.request("/dashboard/summary", RequestOptions::get())
            .await
    }
}
