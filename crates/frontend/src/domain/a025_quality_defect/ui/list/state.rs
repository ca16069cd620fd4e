use crate::domain::a025_quality_defect::actions::{delete_defect, fetch_defects, DELETE_PROMPT};
use crate::domain::a025_quality_defect::api::DefectApi;
use crate::shared::dialogs::Dialogs;
use contracts::domain::a025_quality_defect::dto::DefectListQuery;
use contracts::domain::a025_quality_defect::{Defect, DefectId, DefectStatus};
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DefectTab {
    #[default]
    Occurred,
    Resolved,
}

impl DefectTab {
    pub fn status(&self) -> DefectStatus {
        match self {
            DefectTab::Occurred => DefectStatus::Occurred,
            DefectTab::Resolved => DefectStatus::Resolved,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DefectTab::Occurred => "Open defects",
            DefectTab::Resolved => "Resolved defects",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DefectListState {
    pub active_tab: DefectTab,
    /// yyyy-mm-dd, empty when unset
    pub start_date: String,
    pub end_date: String,
    pub items: Vec<Defect>,
    pub is_loaded: bool,
    pub loading: bool,
    /// Query the current `items` were fetched with
    loaded_query: Option<DefectListQuery>,
    request_seq: u64,
}

impl DefectListState {
    pub fn query(&self) -> DefectListQuery {
        DefectListQuery::new(self.active_tab.status(), &self.start_date, &self.end_date)
    }

    pub fn shows_resolution_column(&self) -> bool {
        self.active_tab == DefectTab::Resolved
    }

    /// Replace the collection; no merging with what was shown before.
    pub fn apply(&mut self, items: Vec<Defect>) {
        self.items = items;
        self.is_loaded = true;
    }

    /// Start a fetch for the current filter and return its sequence number.
    /// Rows fetched under a different filter are dropped right away.
    pub fn begin_load(&mut self) -> u64 {
        let query = self.query();
        if self.loaded_query.as_ref() != Some(&query) {
            self.items.clear();
            self.is_loaded = false;
        }
        self.request_seq += 1;
        self.loading = true;
        self.request_seq
    }

    /// Apply the response of request `seq`. Returns `false` when a newer
    /// request was started meanwhile; its response is the one that counts.
    pub fn finish_load(&mut self, seq: u64, query: DefectListQuery, items: Option<Vec<Defect>>) -> bool {
        if seq != self.request_seq {
            return false;
        }
        self.loading = false;
        if let Some(items) = items {
            self.apply(items);
            self.loaded_query = Some(query);
        }
        true
    }

    /// Refetch after a row delete; ignored if the filter moved on.
    pub fn apply_refresh(&mut self, query: &DefectListQuery, items: Vec<Defect>) -> bool {
        if self.loading || self.query() != *query {
            return false;
        }
        self.apply(items);
        self.loaded_query = Some(query.clone());
        true
    }
}

pub fn create_state() -> RwSignal<DefectListState> {
    RwSignal::new(DefectListState::default())
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// Prompt declined; nothing was sent
    Cancelled,
    Failed,
    /// Deleted; `items` is the refreshed list (`None` if the refetch failed)
    Deleted { items: Option<Vec<Defect>> },
}

/// Row delete: confirm, `DELETE`, then exactly one refetch of `query`.
pub async fn delete_row<A, D>(api: &A, dialogs: &D, id: DefectId, query: &DefectListQuery) -> DeleteOutcome
where
    A: DefectApi + ?Sized,
    D: Dialogs + ?Sized,
{
    if !dialogs.confirm(DELETE_PROMPT) {
        return DeleteOutcome::Cancelled;
    }
    if !delete_defect(api, dialogs, id).await {
        return DeleteOutcome::Failed;
    }
    DeleteOutcome::Deleted {
        items: fetch_defects(api, query).await,
    }
}
