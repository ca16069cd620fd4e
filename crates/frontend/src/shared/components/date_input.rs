use leptos::prelude::*;

/// Native date picker bound to a `yyyy-mm-dd` string. An empty value means "unset".
#[component]
pub fn DateInput(
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(optional)] style: Option<String>,
) -> impl IntoView {
    let default_style = "padding: 6px 8px; border: 1px solid #ced4da; border-radius: 4px; font-size: 0.875rem; background: #fff; width: 140px;";
    let final_style = style.unwrap_or_else(|| default_style.to_string());

    view! {
        <label class="date-input">
            {move || label.get().map(|l| view! { <span class="form__label">{l}</span> })}
            <input
                type="date"
                prop:value=value
                on:input=move |ev| on_change.run(event_target_value(&ev))
                style=final_style
            />
        </label>
    }
}
