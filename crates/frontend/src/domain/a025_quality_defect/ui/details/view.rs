//! Defect Details - View Component
//!
//! Edit form for one defect. Occurred defects offer "Save" and "Confirm
//! resolution"; resolved ones only take a new resolution note.

use super::view_model::{save, DefectForm, EditorActivity, EditorTask, SaveIntent};
use crate::domain::a025_quality_defect::actions::{confirm_and_delete, upload_attachment};
use crate::domain::a025_quality_defect::api::HttpDefectApi;
use crate::shared::components::ui::{DefectStatusBadge, Input, Textarea};
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::file_viewer::FileViewerService;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::number_format::{parse_amount_input, parse_quantity_input};
use contracts::domain::a025_quality_defect::Defect;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

#[component]
#[allow(non_snake_case)]
pub fn DefectDetails(
    #[prop(into)] defect: Signal<Defect>,
    on_close: Callback<()>,
    on_success: Callback<()>,
) -> impl IntoView {
    let api = StoredValue::new(use_context::<HttpDefectApi>().unwrap_or_default());
    let viewer = use_context::<FileViewerService>().unwrap_or_default();

    let form = RwSignal::new(defect.with_untracked(DefectForm::from_defect));
    let amount_text = RwSignal::new(defect.with_untracked(|d| d.amount.to_string()));
    let activity = RwSignal::new(EditorActivity::default());

    // Reload the form whenever another defect is handed in
    Effect::new(move |_| {
        defect.with(|d| {
            form.set(DefectForm::from_defect(d));
            amount_text.set(d.amount.to_string());
        });
    });

    let locked = Signal::derive(move || form.with(|f| f.is_locked()));

    let run_save = move |intent: SaveIntent| {
        if activity.try_update(|a| a.try_begin(EditorTask::Save)) != Some(true) {
            return;
        }
        let id = defect.with_untracked(|d| d.id);
        let snapshot = form.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            let saved = save(&api, &BrowserDialogs, id, &snapshot, intent).await;
            let _ = activity.try_update(|a| a.finish(EditorTask::Save));
            if saved {
                on_success.run(());
            }
        });
    };

    let handle_delete = move |_: leptos::ev::MouseEvent| {
        if activity.try_update(|a| a.try_begin(EditorTask::Delete)) != Some(true) {
            return;
        }
        let id = defect.with_untracked(|d| d.id);
        let api = api.get_value();
        spawn_local(async move {
            let deleted = confirm_and_delete(&api, &BrowserDialogs, id).await;
            let _ = activity.try_update(|a| a.finish(EditorTask::Delete));
            if deleted {
                on_success.run(());
            }
        });
    };

    let handle_file = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        input.set_value("");
        let Some(file) = file else { return };
        if activity.try_update(|a| a.try_begin(EditorTask::Upload)) != Some(true) {
            log::debug!("upload ignored, editor busy");
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            if let Some(uploaded) = upload_attachment(&api, &BrowserDialogs, file).await {
                let _ = form.try_update(|f| f.add_attachment(uploaded));
            }
            let _ = activity.try_update(|a| a.finish(EditorTask::Upload));
        });
    };

    let title = Signal::derive(move || format!("Defect #{}", defect.with(|d| d.id)));
    let busy = Signal::derive(move || activity.with(|a| a.is_busy()));
    let uploading = Signal::derive(move || activity.with(|a| a.is_running(EditorTask::Upload)));

    let footer: ChildrenFn = std::sync::Arc::new(move || {
        view! {
            <Button appearance=ButtonAppearance::Subtle on_click=handle_delete disabled=busy>
                {icon("trash")}
                " Delete"
            </Button>
            <div class="modal-footer__spacer"></div>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Cancel"
            </Button>
            {move || {
                if locked.get() {
                    view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| run_save(SaveIntent::Save)
                            disabled=busy
                        >
                            "Save changes"
                        </Button>
                    }
                    .into_any()
                } else {
                    view! {
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| run_save(SaveIntent::Save)
                            disabled=busy
                        >
                            "Save"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| run_save(SaveIntent::ConfirmResolution)
                            disabled=busy
                        >
                            {icon("check-circle")}
                            " Confirm resolution"
                        </Button>
                    }
                    .into_any()
                }
            }}
        }
        .into_any()
    });

    view! {
        <ModalFrame title=title on_close=on_close footer=footer width=720>
            <div class="defect-details__header">
                <DefectStatusBadge status=Signal::derive(move || defect.with(|d| d.status)) />
                <div>
                    <strong>{move || defect.with(|d| d.order_no().to_string())}</strong>
                    <span class="text-muted">" "{move || defect.with(|d| d.partner_name().to_string())}</span>
                </div>
                <div>
                    {move || defect.with(|d| format!("{} / {}", d.process_name(), d.product_name()))}
                </div>
                <div class="text-muted">
                    "Occurred " {move || defect.with(|d| format_date(&d.defect_date))}
                </div>
                {move || {
                    defect.with(|d| {
                        d.is_resolved()
                            .then(|| d.resolution_date.as_deref().map(format_datetime))
                            .flatten()
                            .map(|at| view! { <div class="text-success">"Resolved " {at}</div> })
                    })
                }}
            </div>

            <div class="form__row">
                <Input
                    label="Quantity"
                    input_type="number"
                    min="0"
                    disabled=locked
                    value=Signal::derive(move || form.with(|f| f.quantity.to_string()))
                    on_input=Callback::new(move |v: String| form.update(|f| f.set_quantity(parse_quantity_input(&v))))
                />
                <Input
                    label="Estimated loss (KRW)"
                    input_type="number"
                    min="0"
                    disabled=locked
                    value=amount_text
                    on_input=Callback::new(move |v: String| {
                        form.update(|f| f.set_amount(parse_amount_input(&v)));
                        amount_text.set(v);
                    })
                />
            </div>

            <Textarea
                label="Defect description"
                rows=3
                disabled=locked
                value=Signal::derive(move || form.with(|f| f.defect_reason.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.set_reason(v)))
            />

            <Textarea
                label="Resolution note"
                placeholder="Cause and corrective action"
                rows=4
                value=Signal::derive(move || form.with(|f| f.resolution_note.clone()))
                on_input=Callback::new(move |v: String| form.update(|f| f.set_note(v)))
            />

            <div class="form__group">
                <label class="form__label">"Attachments"</label>
                <ul class="attachment-list">
                    {move || {
                        let files = form.with(|f| f.attachments.clone());
                        if files.is_empty() {
                            return view! { <li class="text-muted">"No files"</li> }.into_any();
                        }
                        let is_locked = locked.get();
                        files
                            .into_iter()
                            .enumerate()
                            .map(|(index, file)| {
                                view! {
                                    <li class="attachment-list__item">
                                        {icon("paperclip")}
                                        <a
                                            class="attachment-list__name"
                                            href="#"
                                            on:click=move |ev| {
                                                ev.prevent_default();
                                                viewer.show_viewer(form.with_untracked(|f| f.attachments.clone()));
                                            }
                                        >
                                            {file.name}
                                        </a>
                                        {(!is_locked).then(|| view! {
                                            <button
                                                class="button button--icon"
                                                title="Remove"
                                                on:click=move |_| form.update(|f| f.remove_attachment(index))
                                            >
                                                {icon("x")}
                                            </button>
                                        })}
                                    </li>
                                }
                            })
                            .collect_view()
                            .into_any()
                    }}
                </ul>
                <Show when=move || !locked.get()>
                    <label class="button button--secondary attachment-list__add">
                        {icon("plus")}
                        {move || if uploading.get() { " Uploading..." } else { " Add file" }}
                        <input type="file" style="display: none;" disabled=move || busy.get() on:change=handle_file />
                    </label>
                </Show>
            </div>
        </ModalFrame>
    }
}
