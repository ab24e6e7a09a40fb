use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub cases_by_status: BTreeMap<String, u64>,
}

impl DashboardSummary {
    pub fn total_cases(&self) -> u64 {
        self.cases_by_status.values().sum()
    }
}
