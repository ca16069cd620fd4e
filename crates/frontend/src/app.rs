use crate::domain::a025_quality_defect::api::HttpDefectApi;
use crate::domain::a025_quality_defect::ui::QualityDefectList;
use crate::shared::api_utils::ApiConfig;
use crate::shared::file_viewer::{FileViewerHost, FileViewerService};
use crate::shared::modal_frame::ModalLayers;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = ApiConfig::from_window();
    log::info!("quality defects UI, API at {}", config.base_url());

    // API client and attachment viewer are shared by every dialog on the page.
    provide_context(HttpDefectApi::new(config.clone()));
    provide_context(config);
    provide_context(FileViewerService::new());
    provide_context(ModalLayers::new());

    view! {
        <main class="app">
            <QualityDefectList />
            <FileViewerHost />
        </main>
    }
}
