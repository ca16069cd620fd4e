//! Test doubles for the defect workflows.

use super::api::{ApiError, DefectApi};
use crate::shared::dialogs::Dialogs;
use async_trait::async_trait;
use contracts::domain::a025_quality_defect::dto::{
    CreateDefectDto, DefectListQuery, UpdateDefectDto, UploadResponse,
};
use contracts::domain::a025_quality_defect::{Defect, DefectId, DefectStatus};
use contracts::domain::a026_production_plan::ProductionPlan;
use std::cell::{Cell, RefCell};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    ListPlans,
    ListDefects(DefectListQuery),
    Create(CreateDefectDto),
    Update(DefectId, UpdateDefectDto),
    Delete(DefectId),
    Upload(String),
}

/// Records every call; answers from canned data. Uploads are file names.
#[derive(Default)]
pub struct MockDefectApi {
    calls: RefCell<Vec<ApiCall>>,
    plans: RefCell<Vec<ProductionPlan>>,
    defects: RefCell<Vec<Defect>>,
    failure: RefCell<Option<ApiError>>,
    next_id: Cell<i64>,
}

impl MockDefectApi {
    pub fn with_plans(plans: Vec<ProductionPlan>) -> Self {
        let api = Self::default();
        *api.plans.borrow_mut() = plans;
        api
    }

    pub fn with_defects(defects: Vec<Defect>) -> Self {
        let api = Self::default();
        *api.defects.borrow_mut() = defects;
        api
    }

    /// Every following call fails with HTTP 500 and no detail.
    pub fn fail_all(&self) {
        self.fail_with(ApiError::Status {
            status: 500,
            detail: None,
        });
    }

    pub fn fail_with(&self, error: ApiError) {
        *self.failure.borrow_mut() = Some(error);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(call);
        match self.failure.borrow().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait(?Send)]
impl DefectApi for MockDefectApi {
    type Upload = String;

    async fn list_plans(&self) -> Result<Vec<ProductionPlan>, ApiError> {
        self.record(ApiCall::ListPlans)?;
        Ok(self.plans.borrow().clone())
    }

    async fn list_defects(&self, query: &DefectListQuery) -> Result<Vec<Defect>, ApiError> {
        self.record(ApiCall::ListDefects(query.clone()))?;
        Ok(self
            .defects
            .borrow()
            .iter()
            .filter(|d| d.status == query.status)
            .cloned()
            .collect())
    }

    async fn create_defect(&self, dto: &CreateDefectDto) -> Result<Defect, ApiError> {
        self.record(ApiCall::Create(dto.clone()))?;
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let mut defect = sample_defect(id, DefectStatus::Occurred);
        defect.plan_id = Some(dto.plan_id);
        defect.plan_item_id = Some(dto.plan_item_id);
        defect.quantity = dto.quantity;
        defect.defect_reason = dto.defect_reason.clone();
        Ok(defect)
    }

    async fn update_defect(
        &self,
        id: DefectId,
        dto: &UpdateDefectDto,
    ) -> Result<Defect, ApiError> {
        self.record(ApiCall::Update(id, dto.clone()))?;
        let mut defect = sample_defect(id.value(), dto.status);
        defect.resolution_date = dto.resolution_date.clone();
        Ok(defect)
    }

    async fn delete_defect(&self, id: DefectId) -> Result<(), ApiError> {
        self.record(ApiCall::Delete(id))?;
        self.defects.borrow_mut().retain(|d| d.id != id);
        Ok(())
    }

    async fn upload_file(&self, file: String) -> Result<UploadResponse, ApiError> {
        self.record(ApiCall::Upload(file.clone()))?;
        Ok(UploadResponse {
            url: format!("/static/20240315/{}", file),
            filename: file,
        })
    }
}

/// Answers every confirm with a fixed value and keeps the prompts shown.
pub struct ScriptedDialogs {
    answer: bool,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            confirms: RefCell::new(Vec::new()),
            alerts: RefCell::new(Vec::new()),
        }
    }

    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

pub fn sample_defect(id: i64, status: DefectStatus) -> Defect {
    Defect {
        id: DefectId::new(id),
        order_id: Some(3),
        plan_id: Some(5),
        plan_item_id: Some(9),
        defect_reason: "scratch".to_string(),
        quantity: 4,
        amount: 12000.0,
        defect_date: "2024-03-15T00:00:00".to_string(),
        resolution_note: String::new(),
        resolution_date: match status {
            DefectStatus::Resolved => Some("2024-03-16T09:00:00".to_string()),
            DefectStatus::Occurred => None,
        },
        status,
        attachment_file: Vec::new(),
        order: None,
        plan_item: None,
    }
}
