//! Defect Registration - View Component
//!
//! Step one lists eligible production plans as cards; step two lists the plan's
//! process items and the defect fields.

use super::view_model::{load_plans, submit, RegistrationWizard, WizardStep};
use crate::domain::a025_quality_defect::actions::upload_attachment;
use crate::domain::a025_quality_defect::api::HttpDefectApi;
use crate::shared::components::ui::{Input, Textarea};
use crate::shared::date_utils::today_iso;
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::icons::icon;
use crate::shared::modal_frame::ModalFrame;
use crate::shared::number_format::{parse_amount_input, parse_quantity_input};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance};

#[component]
#[allow(non_snake_case)]
pub fn DefectRegistrationWizard(on_close: Callback<()>, on_success: Callback<()>) -> impl IntoView {
    let api = StoredValue::new(use_context::<HttpDefectApi>().unwrap_or_default());
    // Mounted once per open, so every open starts from a fresh wizard.
    let vm = RwSignal::new(RegistrationWizard::opened(today_iso()));

    {
        let api = api.get_value();
        spawn_local(async move {
            let plans = load_plans(&api).await;
            let _ = vm.try_update(|w| w.set_plans(plans));
        });
    }

    let handle_file = move |ev: leptos::ev::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        input.set_value("");
        let Some(file) = file else { return };
        if vm.try_update(|w| w.begin_upload()) != Some(true) {
            log::debug!("upload ignored, wizard busy");
            return;
        }
        let api = api.get_value();
        spawn_local(async move {
            let uploaded = upload_attachment(&api, &BrowserDialogs, file).await;
            let _ = vm.try_update(|w| w.finish_upload(uploaded));
        });
    };

    let handle_submit = move |_: leptos::ev::MouseEvent| {
        if vm.try_update(|w| w.begin_submit()) != Some(true) {
            return;
        }
        let snapshot = vm.get_untracked();
        let api = api.get_value();
        spawn_local(async move {
            log::debug!("submit defect registration");
            let created = submit(&snapshot, &api, &BrowserDialogs).await;
            let _ = vm.try_update(|w| w.submitting = false);
            if created {
                on_success.run(());
            }
        });
    };

    let step = Memo::new(move |_| vm.with(|w| w.step));

    let title = Signal::derive(move || match step.get() {
        WizardStep::SelectPlan => "Register defect: select a production plan".to_string(),
        WizardStep::SelectDetail => "Register defect: process and details".to_string(),
    });

    let footer: ChildrenFn = std::sync::Arc::new(move || {
        view! {
            <Show when=move || step.get() == WizardStep::SelectDetail>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| vm.update(|w| w.back())>
                    {icon("arrow-left")}
                    " Back"
                </Button>
            </Show>
            <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                "Cancel"
            </Button>
            <Show when=move || step.get() == WizardStep::SelectDetail>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=handle_submit
                    disabled=Signal::derive(move || vm.with(|w| w.is_busy()))
                >
                    {move || if vm.with(|w| w.submitting) { "Saving..." } else { "Register" }}
                </Button>
            </Show>
        }
        .into_any()
    });

    view! {
        <ModalFrame title=title on_close=on_close footer=footer width=760>
            {move || match step.get() {
                WizardStep::SelectPlan => view! { <PlanStep vm=vm /> }.into_any(),
                WizardStep::SelectDetail => {
                    view! { <DetailStep vm=vm on_file=Callback::new(handle_file) /> }.into_any()
                }
            }}
        </ModalFrame>
    }
}

#[component]
fn PlanStep(vm: RwSignal<RegistrationWizard>) -> impl IntoView {
    view! {
        <div class="wizard__plans">
            {move || {
                let (loading, plans) = vm.with(|w| (w.plans_loading, w.plans.clone()));
                if loading {
                    return view! { <div class="wizard__placeholder">"Loading production plans..."</div> }.into_any();
                }
                if plans.is_empty() {
                    return view! { <div class="wizard__placeholder">"No production plans are open for defect registration."</div> }.into_any();
                }
                plans
                    .into_iter()
                    .map(|plan| {
                        let plan_id = plan.id;
                        view! {
                            <div class="card card--clickable wizard__plan" on:click=move |_| { vm.update(|w| { w.select_plan(plan_id); }); }>
                                <div class="wizard__plan-head">
                                    <strong>{plan.order_no().to_string()}</strong>
                                    <span class="badge badge--neutral">{plan.status.as_str()}</span>
                                </div>
                                <div class="text-muted">{plan.partner_name().to_string()}</div>
                                <div>{plan.summary()}</div>
                            </div>
                        }
                    })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn DetailStep(
    vm: RwSignal<RegistrationWizard>,
    on_file: Callback<leptos::ev::Event>,
) -> impl IntoView {
    // raw text, so a half-typed "12." is not rewritten under the cursor
    let amount_text = RwSignal::new(vm.with_untracked(|w| w.draft.amount.to_string()));

    view! {
        <div class="wizard__detail">
            <div class="wizard__plan-info">
                {move || vm.with(|w| w.selected_plan.as_ref().map(|p| format!("{} / {}", p.order_no(), p.partner_name())))}
            </div>

            <label class="form__label">"Process"</label>
            <div class="wizard__items">
                {move || {
                    let selected = vm.with(|w| w.selected_item);
                    vm.with(|w| w.visible_items())
                        .into_iter()
                        .map(|item| {
                            let item_id = item.id;
                            let class = if selected == Some(item_id) {
                                "button wizard__item wizard__item--selected"
                            } else {
                                "button wizard__item"
                            };
                            view! {
                                <button class=class on:click=move |_| { vm.update(|w| { w.select_item(item_id); }); }>
                                    <span class="wizard__item-seq">{item.sequence}</span>
                                    <span>{item.process_name.clone()}</span>
                                    <span class="text-muted">{item.product_name().to_string()}</span>
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <div class="form__row">
                <Input
                    label="Defect date"
                    input_type="date"
                    value=Signal::derive(move || vm.with(|w| w.draft.defect_date.clone()))
                    on_input=Callback::new(move |v: String| vm.update(|w| w.draft.defect_date = v))
                />
                <Input
                    label="Quantity"
                    input_type="number"
                    min="0"
                    value=Signal::derive(move || vm.with(|w| w.draft.quantity.to_string()))
                    on_input=Callback::new(move |v: String| vm.update(|w| w.draft.quantity = parse_quantity_input(&v)))
                />
                <Input
                    label="Estimated loss (KRW)"
                    input_type="number"
                    min="0"
                    value=amount_text
                    on_input=Callback::new(move |v: String| {
                        vm.update(|w| w.draft.amount = parse_amount_input(&v));
                        amount_text.set(v);
                    })
                />
            </div>

            <Textarea
                label="Defect description"
                placeholder="What went wrong?"
                rows=4
                value=Signal::derive(move || vm.with(|w| w.draft.defect_reason.clone()))
                on_input=Callback::new(move |v: String| vm.update(|w| w.draft.defect_reason = v))
            />

            <div class="form__group">
                <label class="form__label">"Attachments"</label>
                <ul class="attachment-list">
                    {move || {
                        vm.with(|w| w.draft.attachments.clone())
                            .into_iter()
                            .enumerate()
                            .map(|(index, file)| {
                                view! {
                                    <li class="attachment-list__item">
                                        {icon("paperclip")}
                                        <span>{file.name}</span>
                                        <button
                                            class="button button--icon"
                                            title="Remove"
                                            on:click=move |_| vm.update(|w| w.remove_attachment(index))
                                        >
                                            {icon("x")}
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
                <label class="button button--secondary attachment-list__add">
                    {icon("plus")}
                    {move || if vm.with(|w| w.uploading) { " Uploading..." } else { " Add file" }}
                    <input
                        type="file"
                        style="display: none;"
                        disabled=move || vm.with(|w| w.is_busy())
                        on:change=move |ev| on_file.run(ev)
                    />
                </label>
            </div>
        </div>
    }
}
