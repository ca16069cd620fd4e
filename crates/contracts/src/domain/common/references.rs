//! Read-only relations the backend embeds in defect and plan responses.
//! Display only; the client never sends them back.

use super::serde_helpers::null_as_default;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartnerRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Sales order the plan / defect belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub order_no: Option<String>,
    #[serde(default)]
    pub partner: Option<PartnerRef>,
}

impl OrderRef {
    pub fn order_no(&self) -> &str {
        self.order_no.as_deref().unwrap_or("")
    }

    pub fn partner_name(&self) -> &str {
        self.partner.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Process step of a production plan, as embedded in a defect
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanItemRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub process_name: String,
    #[serde(default)]
    pub product: Option<ProductRef>,
}

impl PlanItemRef {
    pub fn product_name(&self) -> &str {
        self.product.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }
}
