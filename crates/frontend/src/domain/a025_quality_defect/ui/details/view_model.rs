//! Defect details - ViewModel
//!
//! Typed edit form for an existing defect and the two save paths.

use crate::domain::a025_quality_defect::api::DefectApi;
use crate::shared::dialogs::Dialogs;
use chrono::{DateTime, SecondsFormat, Utc};
use contracts::domain::a025_quality_defect::attachments::serialize_attachments;
use contracts::domain::a025_quality_defect::dto::UpdateDefectDto;
use contracts::domain::a025_quality_defect::{AttachmentFile, Defect, DefectId, DefectStatus};

pub const MSG_SAVED: &str = "Changes saved.";
pub const MSG_RESOLVED: &str = "Defect marked as resolved.";
pub const MSG_SAVE_FAILED: &str = "Failed to save the defect.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveIntent {
    /// Keep the form's status
    Save,
    /// Force `RESOLVED`
    ConfirmResolution,
}

/// Request the editor has in flight. At most one runs at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorTask {
    Save,
    Upload,
    Delete,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorActivity {
    running: Option<EditorTask>,
}

impl EditorActivity {
    /// Claims the editor for `task`; `false` while anything else is running.
    pub fn try_begin(&mut self, task: EditorTask) -> bool {
        if self.running.is_some() {
            return false;
        }
        self.running = Some(task);
        true
    }

    pub fn finish(&mut self, task: EditorTask) {
        if self.running == Some(task) {
            self.running = None;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    pub fn is_running(&self, task: EditorTask) -> bool {
        self.running == Some(task)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DefectForm {
    pub defect_reason: String,
    pub quantity: u32,
    pub amount: f64,
    pub resolution_note: String,
    pub status: DefectStatus,
    pub attachments: Vec<AttachmentFile>,
}

impl DefectForm {
    pub fn from_defect(defect: &Defect) -> Self {
        Self {
            defect_reason: defect.defect_reason.clone(),
            quantity: defect.quantity,
            amount: defect.amount,
            resolution_note: defect.resolution_note.clone(),
            status: defect.status,
            attachments: defect.attachment_file.clone(),
        }
    }

    /// Quantity, amount, reason, attachments and status are read-only once
    /// resolved. The note stays editable.
    pub fn is_locked(&self) -> bool {
        self.status == DefectStatus::Resolved
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        if !self.is_locked() {
            self.quantity = quantity;
        }
    }

    pub fn set_amount(&mut self, amount: f64) {
        if !self.is_locked() {
            self.amount = amount;
        }
    }

    pub fn set_reason(&mut self, reason: String) {
        if !self.is_locked() {
            self.defect_reason = reason;
        }
    }

    pub fn set_note(&mut self, note: String) {
        self.resolution_note = note;
    }

    pub fn add_attachment(&mut self, file: AttachmentFile) {
        if !self.is_locked() {
            self.attachments.push(file);
        }
    }

    pub fn remove_attachment(&mut self, index: usize) {
        if !self.is_locked() && index < self.attachments.len() {
            self.attachments.remove(index);
        }
    }

    /// Full-record `PUT` body.
    ///
    /// `resolution_date` is `now` whenever the saved status is `RESOLVED`, so a
    /// plain save of an already resolved defect moves its resolution time.
    pub fn build_update(&self, intent: SaveIntent, now: DateTime<Utc>) -> UpdateDefectDto {
        let status = match intent {
            SaveIntent::Save => self.status,
            SaveIntent::ConfirmResolution => DefectStatus::Resolved,
        };
        let resolution_date = (status == DefectStatus::Resolved)
            .then(|| now.to_rfc3339_opts(SecondsFormat::Millis, true));

        UpdateDefectDto {
            defect_reason: self.defect_reason.clone(),
            quantity: self.quantity,
            amount: self.amount,
            resolution_note: self.resolution_note.clone(),
            status,
            resolution_date,
            attachment_file: serialize_attachments(&self.attachments),
        }
    }
}

/// `PUT` the form. Returns `true` on success; the caller then closes and refetches.
pub async fn save<A, D>(api: &A, dialogs: &D, id: DefectId, form: &DefectForm, intent: SaveIntent) -> bool
where
    A: DefectApi + ?Sized,
    D: Dialogs + ?Sized,
{
    let dto = form.build_update(intent, Utc::now());
    match api.update_defect(id, &dto).await {
        Ok(_) => {
            log::info!("defect {} saved as {}", id, dto.status.as_str());
            dialogs.alert(match intent {
                SaveIntent::ConfirmResolution => MSG_RESOLVED,
                SaveIntent::Save => MSG_SAVED,
            });
            true
        }
        Err(e) => {
            log::error!("Update of defect {} failed: {}", id, e);
            dialogs.alert(MSG_SAVE_FAILED);
            false
        }
    }
}
