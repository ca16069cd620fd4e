pub mod state;

use self::state::{create_state, delete_row, DefectTab, DeleteOutcome};
use crate::domain::a025_quality_defect::actions::fetch_defects;
use crate::domain::a025_quality_defect::api::HttpDefectApi;
use crate::domain::a025_quality_defect::ui::details::DefectDetails;
use crate::domain::a025_quality_defect::ui::registration::DefectRegistrationWizard;
use crate::shared::components::DateInput;
use crate::shared::date_utils::{format_date, format_datetime};
use crate::shared::dialogs::BrowserDialogs;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_amount, format_quantity};
use contracts::domain::a025_quality_defect::{Defect, DefectId};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::{Button, ButtonAppearance, Flex, FlexAlign, FlexGap};

const TABS: [DefectTab; 2] = [DefectTab::Occurred, DefectTab::Resolved];

#[component]
pub fn QualityDefectList() -> impl IntoView {
    let api = StoredValue::new(use_context::<HttpDefectApi>().unwrap_or_default());
    let state = create_state();
    let loading = Signal::derive(move || state.with(|s| s.loading));
    let wizard_open = RwSignal::new(false);
    let selected = RwSignal::new(None::<Defect>);

    let load_items = move || {
        let query = state.with_untracked(|s| s.query());
        let api = api.get_value();
        let Some(seq) = state.try_update(|s| s.begin_load()) else { return };
        spawn_local(async move {
            log::debug!("refetch defects #{}: {:?}", seq, query);
            let items = fetch_defects(&api, &query).await;
            let _ = state.try_update(|s| {
                if !s.finish_load(seq, query, items) {
                    log::debug!("dropped stale defect list response #{}", seq);
                }
            });
        });
    };

    // Only tab and date changes trigger a fetch, not the items it writes back.
    let filter_key = Memo::new(move |_| {
        state.with(|s| (s.active_tab, s.start_date.clone(), s.end_date.clone()))
    });
    Effect::new(move |_| {
        filter_key.track();
        load_items();
    });

    let handle_delete = move |id: DefectId| {
        let api = api.get_value();
        let query = state.with_untracked(|s| s.query());
        spawn_local(async move {
            if let DeleteOutcome::Deleted { items: Some(items) } =
                delete_row(&api, &BrowserDialogs, id, &query).await
            {
                let _ = state.try_update(|s| s.apply_refresh(&query, items));
            }
        });
    };

    let column_count = move || if state.with(|s| s.shows_resolution_column()) { 8 } else { 7 };

    view! {
        <div class="page" id="a025_quality_defect--list">
            <div class="page__header">
                <div class="page__header-left">
                    {icon("alert")}
                    <h1 class="page__title">"Quality defects"</h1>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| wizard_open.set(true)>
                        {icon("plus")}
                        " Register defect"
                    </Button>
                </div>
            </div>

            <div class="tabs">
                {TABS
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <button
                                class=move || {
                                    if state.with(|s| s.active_tab == tab) { "tabs__item tabs__item--active" } else { "tabs__item" }
                                }
                                on:click=move |_| state.update(|s| s.active_tab = tab)
                            >
                                {tab.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="filter-panel">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <DateInput
                        label="From"
                        value=Signal::derive(move || state.with(|s| s.start_date.clone()))
                        on_change=Callback::new(move |v| state.update(|s| s.start_date = v))
                    />
                    <DateInput
                        label="To"
                        value=Signal::derive(move || state.with(|s| s.end_date.clone()))
                        on_change=Callback::new(move |v| state.update(|s| s.end_date = v))
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_items()
                        disabled=loading
                    >
                        {icon("search")}
                        " Search"
                    </Button>
                </Flex>
            </div>

            <div class="table-wrapper">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Date"</th>
                            <th class="table__header-cell">"Order"</th>
                            <th class="table__header-cell">"Product / process"</th>
                            <th class="table__header-cell">"Reason"</th>
                            <th class="table__header-cell table__header-cell--right">"Qty"</th>
                            <th class="table__header-cell table__header-cell--right">"Loss"</th>
                            <Show when=move || state.with(|s| s.shows_resolution_column())>
                                <th class="table__header-cell">"Resolved at"</th>
                            </Show>
                            <th class="table__header-cell table__header-cell--center">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            if loading.get() {
                                return view! {
                                    <tr><td class="table__cell table__cell--placeholder" colspan=column_count()>"Loading..."</td></tr>
                                }
                                .into_any();
                            }
                            let items = state.with(|s| s.items.clone());
                            if items.is_empty() {
                                return view! {
                                    <tr><td class="table__cell table__cell--placeholder" colspan=column_count()>"No defects found"</td></tr>
                                }
                                .into_any();
                            }
                            let show_resolved = state.with(|s| s.shows_resolution_column());
                            items
                                .into_iter()
                                .map(|defect| {
                                    let id = defect.id;
                                    let row_defect = defect.clone();
                                    let edit_defect = defect.clone();
                                    let resolved_at = defect
                                        .resolution_date
                                        .as_deref()
                                        .map(format_datetime)
                                        .unwrap_or_else(|| "-".to_string());
                                    view! {
                                        <tr class="table__row" on:click=move |_| selected.set(Some(row_defect.clone()))>
                                            <td class="table__cell">{format_date(&defect.defect_date)}</td>
                                            <td class="table__cell">
                                                <div>{defect.order_no().to_string()}</div>
                                                <div class="text-muted">{defect.partner_name().to_string()}</div>
                                            </td>
                                            <td class="table__cell">
                                                <div>{defect.product_name().to_string()}</div>
                                                <div class="text-muted">{defect.process_name().to_string()}</div>
                                            </td>
                                            <td class="table__cell">{defect.defect_reason.clone()}</td>
                                            <td class="table__cell table__cell--right">{format_quantity(defect.quantity)}</td>
                                            <td class="table__cell table__cell--right">{format_amount(defect.amount)}</td>
                                            {show_resolved.then(|| view! { <td class="table__cell">{resolved_at}</td> })}
                                            <td class="table__cell table__cell--center" on:click=|ev: ev::MouseEvent| ev.stop_propagation()>
                                                <button
                                                    class="button button--icon"
                                                    title="Edit"
                                                    on:click=move |_| selected.set(Some(edit_defect.clone()))
                                                >
                                                    {icon("edit")}
                                                </button>
                                                <button
                                                    class="button button--icon button--danger"
                                                    title="Delete"
                                                    on:click=move |_| handle_delete(id)
                                                >
                                                    {icon("trash")}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </tbody>
                </table>
            </div>

            <Show when=move || wizard_open.get()>
                <DefectRegistrationWizard
                    on_close=Callback::new(move |_| wizard_open.set(false))
                    on_success=Callback::new(move |_| {
                        wizard_open.set(false);
                        load_items();
                    })
                />
            </Show>

            {move || {
                selected
                    .get()
                    .map(|defect| {
                        view! {
                            <DefectDetails
                                defect=defect
                                on_close=Callback::new(move |_| selected.set(None))
                                on_success=Callback::new(move |_| {
                                    selected.set(None);
                                    load_items();
                                })
                            />
                        }
                    })
            }}
        </div>
    }
}
