//! Defect registration wizard - ViewModel
//!
//! Two steps: pick a production plan, then pick one of its process items and
//! describe the defect. Reset on every open.

use crate::domain::a025_quality_defect::api::DefectApi;
use crate::shared::date_utils::{day_start_timestamp, today_iso};
use crate::shared::dialogs::Dialogs;
use contracts::domain::a025_quality_defect::attachments::serialize_attachments;
use contracts::domain::a025_quality_defect::dto::CreateDefectDto;
use contracts::domain::a025_quality_defect::{AttachmentFile, DefectStatus};
use contracts::domain::a026_production_plan::aggregate::eligible_plans;
use contracts::domain::a026_production_plan::{ProductionPlan, ProductionPlanId, ProductionPlanItem};

pub const MSG_CREATED: &str = "Defect registered.";
pub const MSG_CREATE_FAILED: &str = "Registration failed";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WizardStep {
    #[default]
    SelectPlan,
    SelectDetail,
}

/// Why a submission was refused before anything was sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Select the process where the defect occurred.")]
    NoProcess,
    #[error("Enter the defect description.")]
    EmptyReason,
    #[error("Enter a defect quantity greater than zero.")]
    ZeroQuantity,
    #[error("Enter a valid defect date.")]
    InvalidDate,
}

/// Step-two fields
#[derive(Clone, Debug, PartialEq)]
pub struct DefectDraft {
    /// yyyy-mm-dd
    pub defect_date: String,
    pub quantity: u32,
    pub amount: f64,
    pub defect_reason: String,
    pub attachments: Vec<AttachmentFile>,
}

impl DefectDraft {
    pub fn new(today: String) -> Self {
        Self {
            defect_date: today,
            quantity: 0,
            amount: 0.0,
            defect_reason: String::new(),
            attachments: Vec::new(),
        }
    }
}

impl Default for DefectDraft {
    fn default() -> Self {
        Self::new(today_iso())
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegistrationWizard {
    pub step: WizardStep,
    /// Plans eligible for registration, server order
    pub plans: Vec<ProductionPlan>,
    pub plans_loading: bool,
    pub selected_plan: Option<ProductionPlan>,
    pub selected_item: Option<i64>,
    pub draft: DefectDraft,
    pub submitting: bool,
    pub uploading: bool,
}

impl RegistrationWizard {
    /// Fresh wizard state for a closed -> open transition.
    pub fn opened(today: String) -> Self {
        Self {
            step: WizardStep::SelectPlan,
            plans: Vec::new(),
            plans_loading: true,
            selected_plan: None,
            selected_item: None,
            draft: DefectDraft::new(today),
            submitting: false,
            uploading: false,
        }
    }

    pub fn set_plans(&mut self, plans: Vec<ProductionPlan>) {
        self.plans = eligible_plans(plans);
        self.plans_loading = false;
    }

    /// Move to step two with the given plan. Unknown IDs are ignored.
    pub fn select_plan(&mut self, plan_id: ProductionPlanId) -> bool {
        let Some(plan) = self.plans.iter().find(|p| p.id == plan_id).cloned() else {
            return false;
        };
        if self.selected_plan.as_ref().map(|p| p.id) != Some(plan_id) {
            self.selected_item = None;
        }
        self.selected_plan = Some(plan);
        self.step = WizardStep::SelectDetail;
        true
    }

    /// Back to plan selection. The process choice is dropped so it can never
    /// pair with a different plan; the typed details are kept.
    pub fn back(&mut self) {
        self.step = WizardStep::SelectPlan;
        self.selected_item = None;
    }

    /// Only items of the selected plan can be picked.
    pub fn select_item(&mut self, item_id: i64) -> bool {
        let belongs = self
            .selected_plan
            .as_ref()
            .is_some_and(|plan| plan.find_item(item_id).is_some());
        if belongs {
            self.selected_item = Some(item_id);
        }
        belongs
    }

    /// Items of the selected plan, ascending by `sequence`
    pub fn visible_items(&self) -> Vec<ProductionPlanItem> {
        self.selected_plan
            .as_ref()
            .map(|plan| plan.sorted_items())
            .unwrap_or_default()
    }

    pub fn add_attachment(&mut self, file: AttachmentFile) {
        self.draft.attachments.push(file);
    }

    /// One upload at a time, and none while the defect is being created.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading || self.submitting {
            return false;
        }
        self.uploading = true;
        true
    }

    /// End of an upload; a failed one (`None`) leaves the list as it was.
    pub fn finish_upload(&mut self, file: Option<AttachmentFile>) {
        self.uploading = false;
        if let Some(file) = file {
            self.add_attachment(file);
        }
    }

    /// Submission waits for running uploads so their files are not lost.
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting || self.uploading {
            return false;
        }
        self.submitting = true;
        true
    }

    pub fn is_busy(&self) -> bool {
        self.submitting || self.uploading
    }

    /// Remove by position; out-of-range indices are ignored.
    pub fn remove_attachment(&mut self, index: usize) {
        if index < self.draft.attachments.len() {
            self.draft.attachments.remove(index);
        }
    }

    /// Checks in order: process, reason, quantity, date. First failure wins.
    pub fn build_payload(&self) -> Result<CreateDefectDto, WizardError> {
        let plan = self.selected_plan.as_ref().ok_or(WizardError::NoProcess)?;
        let item = self
            .selected_item
            .and_then(|id| plan.find_item(id))
            .ok_or(WizardError::NoProcess)?;
        if self.draft.defect_reason.trim().is_empty() {
            return Err(WizardError::EmptyReason);
        }
        if self.draft.quantity == 0 {
            return Err(WizardError::ZeroQuantity);
        }
        let defect_date =
            day_start_timestamp(&self.draft.defect_date).ok_or(WizardError::InvalidDate)?;

        Ok(CreateDefectDto {
            order_id: plan.effective_order_id(),
            plan_id: plan.id.value(),
            plan_item_id: item.id,
            defect_reason: self.draft.defect_reason.clone(),
            quantity: self.draft.quantity,
            amount: self.draft.amount,
            defect_date,
            status: DefectStatus::Occurred,
            resolution_date: None,
            attachment_file: serialize_attachments(&self.draft.attachments),
        })
    }
}

/// Fetch plans for step one. Failures are logged and leave the list empty.
pub async fn load_plans<A: DefectApi + ?Sized>(api: &A) -> Vec<ProductionPlan> {
    match api.list_plans().await {
        Ok(plans) => plans,
        Err(e) => {
            log::error!("Failed to fetch production plans: {}", e);
            Vec::new()
        }
    }
}

/// Validate and `POST`. Returns `true` once the server accepted the defect;
/// the wizard stays open on any failure.
pub async fn submit<A, D>(wizard: &RegistrationWizard, api: &A, dialogs: &D) -> bool
where
    A: DefectApi + ?Sized,
    D: Dialogs + ?Sized,
{
    let dto = match wizard.build_payload() {
        Ok(dto) => dto,
        Err(e) => {
            dialogs.alert(&e.to_string());
            return false;
        }
    };

    match api.create_defect(&dto).await {
        Ok(created) => {
            log::info!("defect {} registered", created.id);
            dialogs.alert(MSG_CREATED);
            true
        }
        Err(e) => {
            log::error!("Failed to save defect: {}", e);
            dialogs.alert(&format!("{}: {}", MSG_CREATE_FAILED, e.user_message()));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a025_quality_defect::actions::upload_attachment;
    use crate::domain::a025_quality_defect::api::ApiError;
    use crate::domain::a025_quality_defect::testing::{ApiCall, MockDefectApi, ScriptedDialogs};
    use contracts::domain::a026_production_plan::PlanStatus;
    use futures::executor::block_on;

    fn item(id: i64, sequence: i32, process: &str) -> ProductionPlanItem {
        ProductionPlanItem {
            id,
            sequence,
            process_name: process.to_string(),
            product: None,
        }
    }

    fn plan(id: i64, status: PlanStatus, items: Vec<ProductionPlanItem>) -> ProductionPlan {
        ProductionPlan {
            id: ProductionPlanId::new(id),
            status,
            order_id: Some(500 + id),
            order: None,
            items,
        }
    }

    /// Plan 1 selected, item 11 picked, reason and quantity filled in.
    fn valid_wizard() -> RegistrationWizard {
        let mut wizard = RegistrationWizard::opened("2024-03-15".to_string());
        wizard.set_plans(vec![plan(
            1,
            PlanStatus::InProgress,
            vec![item(11, 1, "Cut"), item(12, 2, "Weld")],
        )]);
        assert!(wizard.select_plan(ProductionPlanId::new(1)));
        assert!(wizard.select_item(11));
        wizard.draft.defect_reason = "burr on edge".to_string();
        wizard.draft.quantity = 3;
        wizard
    }

    #[test]
    fn test_opened_state_is_fresh() {
        let wizard = RegistrationWizard::opened("2024-03-15".to_string());
        assert_eq!(wizard.step, WizardStep::SelectPlan);
        assert!(wizard.selected_plan.is_none());
        assert!(wizard.selected_item.is_none());
        assert_eq!(wizard.draft, DefectDraft::new("2024-03-15".to_string()));
    }

    #[test]
    fn test_set_plans_keeps_eligible_only() {
        let mut wizard = RegistrationWizard::opened("2024-03-15".to_string());
        wizard.set_plans(vec![
            plan(1, PlanStatus::Pending, vec![]),
            plan(2, PlanStatus::Confirmed, vec![]),
            plan(3, PlanStatus::Canceled, vec![]),
        ]);
        assert_eq!(wizard.plans.len(), 1);
        assert_eq!(wizard.plans[0].id, ProductionPlanId::new(2));
        assert!(!wizard.plans_loading);
        assert!(!wizard.select_plan(ProductionPlanId::new(1)));
        assert_eq!(wizard.step, WizardStep::SelectPlan);
    }

    #[test]
    fn test_items_shown_in_sequence_order() {
        let mut wizard = RegistrationWizard::opened("2024-03-15".to_string());
        wizard.set_plans(vec![plan(
            1,
            PlanStatus::Planned,
            vec![item(20, 2, "Weld"), item(10, 1, "Cut")],
        )]);
        wizard.select_plan(ProductionPlanId::new(1));
        let seq: Vec<i32> = wizard.visible_items().iter().map(|i| i.sequence).collect();
        assert_eq!(seq, vec![1, 2]);
    }

    #[test]
    fn test_select_item_rejects_foreign_items() {
        let mut wizard = valid_wizard();
        assert!(!wizard.select_item(999));
        assert_eq!(wizard.selected_item, Some(11));
    }

    #[test]
    fn test_back_clears_process_but_keeps_details() {
        let mut wizard = valid_wizard();
        wizard.back();
        assert_eq!(wizard.step, WizardStep::SelectPlan);
        assert_eq!(wizard.selected_item, None);
        assert_eq!(wizard.draft.quantity, 3);
        assert_eq!(wizard.draft.defect_reason, "burr on edge");
    }

    #[test]
    fn test_rejects_without_process() {
        let mut wizard = valid_wizard();
        wizard.selected_item = None;
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(true);

        assert!(!block_on(submit(&wizard, &api, &dialogs)));
        assert!(api.calls().is_empty());
        assert_eq!(dialogs.alerts(), vec![WizardError::NoProcess.to_string()]);
    }

    #[test]
    fn test_rejects_blank_reason() {
        let mut wizard = valid_wizard();
        wizard.draft.defect_reason = "   \n".to_string();
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(true);

        assert!(!block_on(submit(&wizard, &api, &dialogs)));
        assert!(api.calls().is_empty());
        assert_eq!(dialogs.alerts(), vec![WizardError::EmptyReason.to_string()]);
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let mut wizard = valid_wizard();
        wizard.draft.quantity = 0;
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(true);

        assert!(!block_on(submit(&wizard, &api, &dialogs)));
        assert!(api.calls().is_empty());
        assert_eq!(dialogs.alerts(), vec![WizardError::ZeroQuantity.to_string()]);
    }

    #[test]
    fn test_validation_order_process_first() {
        let mut wizard = valid_wizard();
        wizard.selected_item = None;
        wizard.draft.defect_reason.clear();
        wizard.draft.quantity = 0;
        assert_eq!(wizard.build_payload(), Err(WizardError::NoProcess));

        wizard.select_item(12);
        assert_eq!(wizard.build_payload(), Err(WizardError::EmptyReason));
    }

    #[test]
    fn test_rejects_invalid_date() {
        let mut wizard = valid_wizard();
        wizard.draft.defect_date.clear();
        assert_eq!(wizard.build_payload(), Err(WizardError::InvalidDate));
    }

    #[test]
    fn test_attachments_keep_upload_order_and_remove_by_index() {
        let mut wizard = valid_wizard();
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(true);

        for name in ["a.png", "b.png"] {
            let file = block_on(upload_attachment(&api, &dialogs, name.to_string())).unwrap();
            wizard.add_attachment(file);
        }
        let names: Vec<&str> = wizard.draft.attachments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png"]);

        wizard.remove_attachment(0);
        let names: Vec<&str> = wizard.draft.attachments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.png"]);

        wizard.remove_attachment(5);
        assert_eq!(wizard.draft.attachments.len(), 1);
    }

    #[test]
    fn test_failed_upload_keeps_previous_attachments() {
        let mut wizard = valid_wizard();
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(true);

        let first = block_on(upload_attachment(&api, &dialogs, "a.png".to_string())).unwrap();
        wizard.add_attachment(first);
        api.fail_all();
        if let Some(file) = block_on(upload_attachment(&api, &dialogs, "b.png".to_string())) {
            wizard.add_attachment(file);
        }
        assert_eq!(wizard.draft.attachments.len(), 1);
        assert_eq!(wizard.draft.attachments[0].name, "a.png");
    }

    #[test]
    fn test_second_upload_refused_while_first_runs() {
        let mut wizard = valid_wizard();
        assert!(wizard.begin_upload());
        assert!(!wizard.begin_upload());
        assert!(!wizard.begin_submit());

        wizard.finish_upload(Some(AttachmentFile::new("a.png", "/static/a.png")));
        assert!(!wizard.uploading);
        assert_eq!(wizard.draft.attachments.len(), 1);
        assert!(wizard.begin_upload());
        wizard.finish_upload(None);
        assert_eq!(wizard.draft.attachments.len(), 1);
    }

    #[test]
    fn test_upload_refused_while_submitting() {
        let mut wizard = valid_wizard();
        assert!(wizard.begin_submit());
        assert!(!wizard.begin_submit());
        assert!(!wizard.begin_upload());
        assert!(wizard.is_busy());
    }

    #[test]
    fn test_payload_serializes_attachments_only_when_present() {
        let mut wizard = valid_wizard();
        assert_eq!(wizard.build_payload().unwrap().attachment_file, None);

        wizard.add_attachment(AttachmentFile::new("a.png", "/static/a.png"));
        let encoded = wizard.build_payload().unwrap().attachment_file.unwrap();
        assert_eq!(encoded, r#"[{"name":"a.png","url":"/static/a.png"}]"#);
    }

    #[test]
    fn test_failed_create_prefers_server_detail() {
        let wizard = valid_wizard();
        let api = MockDefectApi::default();
        api.fail_with(ApiError::Status {
            status: 422,
            detail: Some("plan_item_id does not belong to plan".into()),
        });
        let dialogs = ScriptedDialogs::answering(true);

        assert!(!block_on(submit(&wizard, &api, &dialogs)));
        assert_eq!(
            dialogs.alerts(),
            vec![format!(
                "{}: plan_item_id does not belong to plan",
                MSG_CREATE_FAILED
            )]
        );
    }

    #[test]
    fn test_failed_create_falls_back_to_error_text() {
        let wizard = valid_wizard();
        let api = MockDefectApi::default();
        api.fail_with(ApiError::Network("offline".into()));
        let dialogs = ScriptedDialogs::answering(true);

        assert!(!block_on(submit(&wizard, &api, &dialogs)));
        assert_eq!(
            dialogs.alerts(),
            vec![format!("{}: network error: offline", MSG_CREATE_FAILED)]
        );
    }

    #[test]
    fn test_register_defect_end_to_end() {
        let api = MockDefectApi::with_plans(vec![plan(
            1,
            PlanStatus::Planned,
            vec![item(41, 1, "Cut")],
        )]);
        let dialogs = ScriptedDialogs::answering(true);

        let mut wizard = RegistrationWizard::opened("2024-03-15".to_string());
        wizard.set_plans(block_on(load_plans(&api)));
        assert!(wizard.select_plan(ProductionPlanId::new(1)));
        let cut = wizard
            .visible_items()
            .into_iter()
            .find(|i| i.process_name == "Cut")
            .unwrap();
        assert!(wizard.select_item(cut.id));
        wizard.draft.quantity = 5;
        wizard.draft.defect_reason = "scratch".to_string();

        assert!(block_on(submit(&wizard, &api, &dialogs)));

        let calls = api.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ApiCall::ListPlans);
        let ApiCall::Create(dto) = &calls[1] else {
            panic!("expected a create call, got {:?}", calls[1]);
        };
        assert_eq!(dto.quantity, 5);
        assert_eq!(dto.plan_item_id, 41);
        assert_eq!(dto.plan_id, 1);
        assert_eq!(dto.order_id, Some(501));
        assert_eq!(dto.resolution_date, None);
        assert_eq!(dto.status, DefectStatus::Occurred);
        assert_eq!(dto.defect_date, "2024-03-15T00:00:00.000Z");

        let body = serde_json::to_value(dto).unwrap();
        assert_eq!(body["quantity"], 5);
        assert_eq!(body["resolution_date"], serde_json::Value::Null);
        assert_eq!(dialogs.alerts(), vec![MSG_CREATED.to_string()]);
    }
}
