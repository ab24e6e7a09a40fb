use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
    New,
    InPreparation,
    ReadyForReview,
    RevisionRequired,
    Approved,
    SurgeryScheduled,
    SurgeryDone,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 7] = [
        PatientStatus::New,
        PatientStatus::InPreparation,
        PatientStatus::ReadyForReview,
        PatientStatus::RevisionRequired,
        PatientStatus::Approved,
        PatientStatus::SurgeryScheduled,
        PatientStatus::SurgeryDone,
    ];

    /// Wire name, as used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            PatientStatus::New => "NEW",
            PatientStatus::InPreparation => "IN_PREPARATION",
            PatientStatus::ReadyForReview => "READY_FOR_REVIEW",
            PatientStatus::RevisionRequired => "REVISION_REQUIRED",
            PatientStatus::Approved => "APPROVED",
            PatientStatus::SurgeryScheduled => "SURGERY_SCHEDULED",
            PatientStatus::SurgeryDone => "SURGERY_DONE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PatientStatus::New => "New",
            PatientStatus::InPreparation => "In preparation",
            PatientStatus::ReadyForReview => "Ready for review",
            PatientStatus::RevisionRequired => "Revision required",
            PatientStatus::Approved => "Approved",
            PatientStatus::SurgeryScheduled => "Surgery scheduled",
            PatientStatus::SurgeryDone => "Surgery done",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    pub id: i64,
    #[serde(default)]
    pub organization_id: Option<i64>,
    pub fio: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub snils: Option<String>,
    #[serde(default)]
    pub polis: Option<String>,
    #[serde(default)]
    pub passport: Option<String>,
    pub status: PatientStatus,
    #[serde(default)]
    pub diagnosis_text: Option<String>,
    #[serde(default)]
    pub operation_type: Option<String>,
    #[serde(default)]
    pub fhir_id: Option<String>,
    #[serde(default)]
    pub external_system_id: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Filters for the patient listing.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientQuery {
    pub status: Option<PatientStatus>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}
