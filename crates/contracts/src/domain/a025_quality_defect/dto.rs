use super::aggregate::DefectStatus;
use super::attachments::AttachmentFile;
use serde::{Deserialize, Serialize};

/// Query string of `GET /quality/defects/`. Empty date bounds are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectListQuery {
    pub status: DefectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl DefectListQuery {
    pub fn new(status: DefectStatus, start_date: &str, end_date: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }

        Self {
            status,
            start_date: non_empty(start_date),
            end_date: non_empty(end_date),
        }
    }
}

/// Body of `POST /quality/defects/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDefectDto {
    pub order_id: Option<i64>,
    pub plan_id: i64,
    pub plan_item_id: i64,
    pub defect_reason: String,
    pub quantity: u32,
    pub amount: f64,
    /// Full UTC timestamp of the defect day
    pub defect_date: String,
    pub status: DefectStatus,
    pub resolution_date: Option<String>,
    /// JSON-encoded `[{name, url}]`, `None` when there are no files
    pub attachment_file: Option<String>,
}

/// Body of `PUT /quality/defects/{id}`. Always the full editable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDefectDto {
    pub defect_reason: String,
    pub quantity: u32,
    pub amount: f64,
    pub resolution_note: String,
    pub status: DefectStatus,
    pub resolution_date: Option<String>,
    pub attachment_file: Option<String>,
}

impl UpdateDefectDto {
    /// `RESOLVED` exactly when a resolution timestamp is present
    pub fn is_consistent(&self) -> bool {
        (self.status == DefectStatus::Resolved) == self.resolution_date.is_some()
    }
}

/// Response of `POST /upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub url: String,
}

impl From<UploadResponse> for AttachmentFile {
    fn from(r: UploadResponse) -> Self {
        AttachmentFile::new(r.filename, r.url)
    }
}
