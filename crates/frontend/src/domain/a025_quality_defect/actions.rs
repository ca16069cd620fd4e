//! Async flows shared by the list page and the dialogs.
//!
//! Each flow awaits a single round trip, logs failures and reports them
//! through a blocking alert. Nothing is retried.

use super::api::DefectApi;
use crate::shared::dialogs::Dialogs;
use contracts::domain::a025_quality_defect::dto::DefectListQuery;
use contracts::domain::a025_quality_defect::{AttachmentFile, Defect, DefectId};

pub const DELETE_PROMPT: &str = "Delete this defect record? This cannot be undone.";
pub const MSG_DELETED: &str = "Defect deleted.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete the defect.";
pub const MSG_UPLOAD_FAILED: &str = "File upload failed.";

/// Ask for confirmation, then `DELETE`. Returns `true` when the record is gone.
pub async fn confirm_and_delete<A, D>(api: &A, dialogs: &D, id: DefectId) -> bool
where
    A: DefectApi + ?Sized,
    D: Dialogs + ?Sized,
{
    if !dialogs.confirm(DELETE_PROMPT) {
        return false;
    }
    delete_defect(api, dialogs, id).await
}

/// `DELETE` without prompting; the caller has already confirmed.
pub async fn delete_defect<A, D>(api: &A, dialogs: &D, id: DefectId) -> bool
where
    A: DefectApi + ?Sized,
    D: Dialogs + ?Sized,
{
    match api.delete_defect(id).await {
        Ok(()) => {
            log::info!("defect {} deleted", id);
            dialogs.alert(MSG_DELETED);
            true
        }
        Err(e) => {
            log::error!("Delete of defect {} failed: {}", id, e);
            dialogs.alert(MSG_DELETE_FAILED);
            false
        }
    }
}

/// Upload one file. On failure the caller's attachment list stays as it was.
pub async fn upload_attachment<A, D>(api: &A, dialogs: &D, file: A::Upload) -> Option<AttachmentFile>
where
    A: DefectApi + ?Sized,
    D: Dialogs + ?Sized,
{
    match api.upload_file(file).await {
        Ok(uploaded) => {
            log::debug!("uploaded {} -> {}", uploaded.filename, uploaded.url);
            Some(uploaded.into())
        }
        Err(e) => {
            log::error!("Upload failed: {}", e);
            dialogs.alert(MSG_UPLOAD_FAILED);
            None
        }
    }
}

/// Fetch the list for `query`. Errors are logged and returned to the caller,
/// which keeps whatever it showed before.
pub async fn fetch_defects<A>(api: &A, query: &DefectListQuery) -> Option<Vec<Defect>>
where
    A: DefectApi + ?Sized,
{
    match api.list_defects(query).await {
        Ok(items) => {
            log::debug!(
                "loaded {} {} defects",
                items.len(),
                query.status.as_str()
            );
            Some(items)
        }
        Err(e) => {
            log::error!("Failed to fetch defects: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a025_quality_defect::testing::{ApiCall, MockDefectApi, ScriptedDialogs};
    use contracts::domain::a025_quality_defect::DefectStatus;
    use futures::executor::block_on;

    #[test]
    fn test_declined_delete_makes_no_call() {
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(false);

        assert!(!block_on(confirm_and_delete(&api, &dialogs, DefectId::new(3))));
        assert!(api.calls().is_empty());
        assert_eq!(dialogs.confirms(), vec![DELETE_PROMPT.to_string()]);
        assert!(dialogs.alerts().is_empty());
    }

    #[test]
    fn test_confirmed_delete_calls_once() {
        let api = MockDefectApi::default();
        let dialogs = ScriptedDialogs::answering(true);

        assert!(block_on(confirm_and_delete(&api, &dialogs, DefectId::new(3))));
        assert_eq!(api.calls(), vec![ApiCall::Delete(DefectId::new(3))]);
        assert_eq!(dialogs.alerts(), vec![MSG_DELETED.to_string()]);
    }

    #[test]
    fn test_failed_delete_alerts_generic_message() {
        let api = MockDefectApi::default();
        api.fail_all();
        let dialogs = ScriptedDialogs::answering(true);

        assert!(!block_on(confirm_and_delete(&api, &dialogs, DefectId::new(3))));
        assert_eq!(dialogs.alerts(), vec![MSG_DELETE_FAILED.to_string()]);
    }

    #[test]
    fn test_upload_failure_alerts_and_returns_none() {
        let api = MockDefectApi::default();
        api.fail_all();
        let dialogs = ScriptedDialogs::answering(true);

        let result = block_on(upload_attachment(&api, &dialogs, "a.png".to_string()));
        assert_eq!(result, None);
        assert_eq!(dialogs.alerts(), vec![MSG_UPLOAD_FAILED.to_string()]);
    }

    #[test]
    fn test_fetch_failure_returns_none() {
        let api = MockDefectApi::default();
        api.fail_all();
        let query = DefectListQuery::new(DefectStatus::Occurred, "", "");
        assert_eq!(block_on(fetch_defects(&api, &query)), None);
    }
}
