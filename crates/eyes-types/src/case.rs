use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Case statuses the backend is known to emit. Statuses are free-form
/// strings on the wire, so these are used for filters and labels only.
pub const CASE_STATUSES: &[&str] = &[
    "DRAFT",
    "NEED_DATA",
    "IN_PROGRESS",
    "ON_REVIEW",
    "IN_CALC_QUEUE",
    "CALCULATED",
];

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaseSummary {
    pub id: i64,
    pub patient_id: i64,
    #[serde(default)]
    pub template_id: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub progress_percent: u8,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaseDetail {
    pub id: i64,
    pub patient_id: i64,
    #[serde(default)]
    pub template_id: Option<i64>,
    pub status: String,
    #[serde(default)]
    pub progress_percent: u8,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub items: Vec<CaseItem>,
    /// Opaque result blob; `{"raw": ...}` when the backend could not parse it.
    #[serde(default)]
    pub calc_result: Option<Value>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub comments: Vec<CaseComment>,
}

impl CaseDetail {
    /// The stored measurement item, if any.
    pub fn measurements(&self) -> Option<Measurements> {
        self.items
            .iter()
            .find(|item| item.kind == CaseItemKind::Measurement)
            .and_then(|item| item.value_json.as_ref())
            .map(Measurements::from_value)
    }

    /// The calculation result, when it has the expected shape.
    pub fn calculation(&self) -> Option<CalculationResult> {
        self.calc_result
            .clone()
            .and_then(|v| serde_json::from_value(v).ok())
    }

    /// Items that are plain checklist entries.
    pub fn checklist(&self) -> impl Iterator<Item = &CaseItem> {
        self.items
            .iter()
            .filter(|item| item.kind == CaseItemKind::ChecklistItem)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaseItemKind {
    ChecklistItem,
    Measurement,
    CalcResult,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaseItem {
    pub id: i64,
    #[serde(default)]
    pub item_template_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_at: Option<String>,
    #[serde(default)]
    pub value_text: Option<String>,
    #[serde(default)]
    pub value_json: Option<Value>,
    #[serde(default)]
    pub note: Option<String>,
    pub kind: CaseItemKind,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    pub action: String,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaseComment {
    pub id: i64,
    #[serde(default)]
    pub author_user_id: Option<i64>,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Biometry submitted for IOL calculation.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Measurements {
    pub axial_length_mm: Option<f64>,
    pub k1_d: Option<f64>,
    pub k2_d: Option<f64>,
    pub note: Option<String>,
}

impl Measurements {
    /// Lenient read of a stored measurement blob. Numbers may arrive as
    /// strings; anything unreadable becomes `None`.
    pub fn from_value(value: &Value) -> Self {
        let number = |key: &str| match value.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        };
        Self {
            axial_length_mm: number("axial_length_mm"),
            k1_d: number("k1_d"),
            k2_d: number("k2_d"),
            note: value
                .get("note")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculationInput {
    pub axial_length_mm: Option<f64>,
    pub k1_d: Option<f64>,
    pub k2_d: Option<f64>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    pub recommended_iol_power: Option<f64>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub input: CalculationInput,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CalculateResponse {
    #[serde(default)]
    pub ok: bool,
    pub result: CalculationResult,
}

/// Entry of the surgeon calculation queue.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct QueueEntry {
    pub id: i64,
    pub patient_id: i64,
    pub status: String,
    #[serde(default)]
    pub progress_percent: u8,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct CaseQuery {
    pub status: Option<String>,
    pub patient_id: Option<i64>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewCase {
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CreatedCase {
    pub id: i64,
}
