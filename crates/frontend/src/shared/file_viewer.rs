//! Attachment viewer overlay.
//!
//! Components call [`FileViewerService::show_viewer`]; the single
//! [`FileViewerHost`] mounted by the app renders the list of files with an
//! "open" link per entry. File contents are never rendered in-app.

use crate::shared::api_utils::ApiConfig;
use crate::shared::components::ui::Badge;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use contracts::domain::a025_quality_defect::AttachmentFile;
use leptos::prelude::*;

/// How an attachment would be previewed, derived from its file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewKind {
    Image,
    Pdf,
    Text,
    External,
}

impl PreviewKind {
    pub fn label(self) -> &'static str {
        match self {
            PreviewKind::Image => "Image",
            PreviewKind::Pdf => "PDF",
            PreviewKind::Text => "Text",
            PreviewKind::External => "File",
        }
    }

    fn badge_variant(self) -> &'static str {
        match self {
            PreviewKind::Image => "success",
            PreviewKind::Pdf => "error",
            PreviewKind::Text => "primary",
            PreviewKind::External => "neutral",
        }
    }
}

/// Lowercased extension without the dot; empty when the name has none.
pub fn file_extension(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}

pub fn preview_kind(name: &str) -> PreviewKind {
    match file_extension(name).as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "svg" => PreviewKind::Image,
        "pdf" => PreviewKind::Pdf,
        "txt" | "csv" | "log" | "json" | "md" => PreviewKind::Text,
        _ => PreviewKind::External,
    }
}

/// Shared handle, provided via context by `App`.
#[derive(Clone, Copy)]
pub struct FileViewerService {
    files: RwSignal<Option<Vec<AttachmentFile>>>,
}

impl FileViewerService {
    pub fn new() -> Self {
        Self {
            files: RwSignal::new(None),
        }
    }

    pub fn show_viewer(&self, files: Vec<AttachmentFile>) {
        log::debug!("file viewer: {} file(s)", files.len());
        self.files.set(Some(files));
    }

    pub fn close(&self) {
        self.files.set(None);
    }

    pub fn is_open(&self) -> bool {
        self.files.with(|files| files.is_some())
    }
}

impl Default for FileViewerService {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn FileViewerHost() -> impl IntoView {
    let service = use_context::<FileViewerService>().unwrap_or_default();
    let config = StoredValue::new(use_context::<ApiConfig>().unwrap_or_default());

    view! {
        <Show when=move || service.is_open()>
            <ModalFrame
                title="Attachments".to_string()
                on_close=Callback::new(move |_| service.close())
                width=560
                z_index=1100
            >
                <ul class="file-viewer__list">
                    {move || {
                        service
                            .files
                            .get()
                            .unwrap_or_default()
                            .into_iter()
                            .map(|file| {
                                let kind = preview_kind(&file.name);
                                let href = config.with_value(|c| c.resolve_file_url(&file.url));
                                view! {
                                    <li class="file-viewer__item">
                                        {icon("file")}
                                        <span class="file-viewer__name">{file.name.clone()}</span>
                                        <Badge variant=kind.badge_variant().to_string()>{kind.label()}</Badge>
                                        <a class="button button--secondary" href=href target="_blank" rel="noopener">
                                            "Open"
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </ModalFrame>
        </Show>
    }
}
