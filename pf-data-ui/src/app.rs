//! App Root Component
//!
//! Provides global state, loads the directory once, and refetches the
//! population series whenever the selection changes.

use leptos::*;

use crate::components::{PopulationChart, PrefectureSelect};
use crate::state::global::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Load the prefecture directory on mount
    create_effect(move |_| state.load_directory());

    // Selection change -> fetch and replace datasets
    create_effect(move |_| {
        let selection = state.selection.get();
        state.refresh_datasets(selection);
    });

    view! {
        <header>
            <div class="checker-ttl">
                <Logo />
                <h1>"人口チェッカー"</h1>
            </div>
        </header>
        <div class="top-contents">
            <h2>"都道府県"</h2>
            <section class="top-prefecture">
                <PrefectureSelect />
            </section>
            <div class="graph-contents">
                <h2>"人口増減グラフ"</h2>
                <PopulationChart />
            </div>
        </div>
    }
}

/// Header mark
#[component]
fn Logo() -> impl IntoView {
    view! {
        <svg
            class="checker-ico"
            width="38"
            height="38"
            viewBox="0 0 38 38"
            fill="none"
            xmlns="http://www.w3.org/2000/svg"
        >
            <path
                fill-rule="evenodd"
                clip-rule="evenodd"
                d="M26.7407 26.7407L26.7407 0L38 11.2593V38H38H11.2592L-1.14441e-05 26.7407L26.7407 26.7407H26.7407Z"
                fill="black"
            />
        </svg>
    }
}
