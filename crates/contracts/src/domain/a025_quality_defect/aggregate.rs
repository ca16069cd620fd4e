use super::attachments::{deserialize_attachments, AttachmentFile};
use crate::domain::common::serde_helpers::null_as_default;
use crate::domain::common::{OrderRef, PlanItemRef};
use serde::{Deserialize, Serialize};

crate::int_aggregate_id!(
    /// Server-assigned ID of a quality defect
    DefectId
);

/// Lifecycle of a defect. `Occurred -> Resolved` is one-way in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DefectStatus {
    #[default]
    Occurred,
    Resolved,
}

impl DefectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DefectStatus::Occurred => "OCCURRED",
            DefectStatus::Resolved => "RESOLVED",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DefectStatus::Occurred => "Open",
            DefectStatus::Resolved => "Resolved",
        }
    }
}

/// Quality defect (aggregate a025), as returned by `/quality/defects/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defect {
    pub id: DefectId,

    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub plan_id: Option<i64>,
    #[serde(default)]
    pub plan_item_id: Option<i64>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub defect_reason: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub quantity: u32,

    /// Estimated loss
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,

    /// ISO timestamp (`2024-03-15T00:00:00`), timezone optional
    #[serde(default, deserialize_with = "null_as_default")]
    pub defect_date: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub resolution_note: String,

    #[serde(default)]
    pub resolution_date: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub status: DefectStatus,

    #[serde(default, deserialize_with = "deserialize_attachments")]
    pub attachment_file: Vec<AttachmentFile>,

    #[serde(default)]
    pub order: Option<OrderRef>,
    #[serde(default)]
    pub plan_item: Option<PlanItemRef>,
}

impl Defect {
    pub fn is_resolved(&self) -> bool {
        self.status == DefectStatus::Resolved
    }

    pub fn order_no(&self) -> &str {
        self.order.as_ref().map(|o| o.order_no()).unwrap_or("")
    }

    pub fn partner_name(&self) -> &str {
        self.order.as_ref().map(|o| o.partner_name()).unwrap_or("")
    }

    pub fn process_name(&self) -> &str {
        self.plan_item
            .as_ref()
            .map(|i| i.process_name.as_str())
            .unwrap_or("")
    }

    pub fn product_name(&self) -> &str {
        self.plan_item.as_ref().map(|i| i.product_name()).unwrap_or("")
    }
}
