use eyes_types::{Patient, PatientQuery};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::token::TokenStore;

impl<S: TokenStore> ApiClient<S> {
    pub async fn list_patients(&self, query: &PatientQuery) -> Result<Vec<Patient>, ApiError> {
        let opts = RequestOptions::get()
            .query("status", query.status.map(|s| s.as_str()))
            .query("limit", query.limit)
            .query("offset", query.offset);
        self.request("/patients/", opts).await
    }

    pub async fn get_patient(&self, id: i64) -> Result<Patient, ApiError> {
        self.request(&format!("/patients/{id}"), RequestOptions::get())
            .await
    }
}
