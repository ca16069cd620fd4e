use crate::domain::common::serde_helpers::null_as_default;
use crate::domain::common::{OrderRef, ProductRef};
use serde::{Deserialize, Serialize};

crate::int_aggregate_id!(
    /// ID of a production plan (aggregate a026)
    ProductionPlanId
);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanStatus {
    Pending,
    #[default]
    Planned,
    Confirmed,
    InProgress,
    Completed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl PlanStatus {
    /// Defects can only be registered against these plans.
    pub fn accepts_defects(&self) -> bool {
        matches!(
            self,
            PlanStatus::Planned
                | PlanStatus::Confirmed
                | PlanStatus::InProgress
                | PlanStatus::Completed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Pending => "PENDING",
            PlanStatus::Planned => "PLANNED",
            PlanStatus::Confirmed => "CONFIRMED",
            PlanStatus::InProgress => "IN_PROGRESS",
            PlanStatus::Completed => "COMPLETED",
            PlanStatus::Canceled => "CANCELED",
            PlanStatus::Unknown => "UNKNOWN",
        }
    }
}

/// Process step of a plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlanItem {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sequence: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub process_name: String,
    #[serde(default)]
    pub product: Option<ProductRef>,
}

impl ProductionPlanItem {
    pub fn product_name(&self) -> &str {
        self.product.as_ref().map(|p| p.name.as_str()).unwrap_or("")
    }
}

/// Production plan, read-only on the quality screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPlan {
    pub id: ProductionPlanId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PlanStatus,
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub order: Option<OrderRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<ProductionPlanItem>,
}

impl ProductionPlan {
    /// Items ordered by ascending `sequence`; ties keep server order.
    pub fn sorted_items(&self) -> Vec<ProductionPlanItem> {
        let mut items = self.items.clone();
        items.sort_by_key(|item| item.sequence);
        items
    }

    pub fn find_item(&self, item_id: i64) -> Option<&ProductionPlanItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Order reference sent with a new defect. Falls back to the embedded order.
    pub fn effective_order_id(&self) -> Option<i64> {
        self.order_id
            .or_else(|| self.order.as_ref().and_then(|o| o.id))
    }

    pub fn order_no(&self) -> &str {
        self.order.as_ref().map(|o| o.order_no()).unwrap_or("")
    }

    pub fn partner_name(&self) -> &str {
        self.order.as_ref().map(|o| o.partner_name()).unwrap_or("")
    }

    /// "Bracket (+2 more)" style summary of the plan's products
    pub fn summary(&self) -> String {
        let first = self
            .items
            .first()
            .map(|item| item.product_name().to_string())
            .unwrap_or_default();
        match self.items.len() {
            0 | 1 => first,
            n => format!("{} (+{} more)", first, n - 1),
        }
    }
}

/// Keeps the plans a defect can be registered against, in server order.
pub fn eligible_plans(plans: Vec<ProductionPlan>) -> Vec<ProductionPlan> {
    plans
        .into_iter()
        .filter(|plan| plan.status.accepts_defects())
        .collect()
}
