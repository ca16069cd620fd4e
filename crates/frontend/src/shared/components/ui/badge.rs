use contracts::domain::a025_quality_defect::DefectStatus;
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

/// Occurred defects render as an error badge, resolved ones as success.
pub fn defect_status_variant(status: DefectStatus) -> &'static str {
    match status {
        DefectStatus::Occurred => "error",
        DefectStatus::Resolved => "success",
    }
}

#[component]
pub fn DefectStatusBadge(#[prop(into)] status: Signal<DefectStatus>) -> impl IntoView {
    view! {
        <span class=move || format!("badge badge--status badge--{}", defect_status_variant(status.get()))>
            {move || status.get().label()}
        </span>
    }
}
