//! Loading Component
//!
//! Spinner shown while population data is being fetched.

use leptos::*;

/// Inline loading spinner
#[component]
pub fn InlineLoading() -> impl IntoView {
    view! {
        <span class="absolute top-2 right-2 inline-block loading-spinner w-4 h-4" />
    }
}
