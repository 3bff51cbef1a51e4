//! Prefecture Select Component
//!
//! Searchable multi-select: chosen prefectures show as removable chips,
//! typing narrows the option list, and every change replaces the whole
//! selection in [`GlobalState`].

use leptos::*;

use pf_data::chart::UNKNOWN_PREFECTURE;
use pf_data::SelectionController;

use crate::state::global::{with_added, without, GlobalState};

/// Multi-select control populated from the prefecture directory
#[component]
pub fn PrefectureSelect() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (query, set_query) = create_signal(String::new());
    let (open, set_open) = create_signal(false);

    // Options still available for picking
    let options = create_memo(move |_| {
        let selection = state.selection.get();
        SelectionController::search(&state.directory(), &query.get())
            .into_iter()
            .filter(|option| !selection.contains(option.value))
            .collect::<Vec<_>>()
    });

    // Chips for the current selection, in selection order
    let chips = move || {
        let directory = state.directory();
        state
            .selection
            .get()
            .codes()
            .iter()
            .map(|&code| {
                let label = directory
                    .name_of(code)
                    .unwrap_or(UNKNOWN_PREFECTURE)
                    .to_string();
                view! {
                    <span class="pf-select__chip">
                        {label}
                        <button
                            class="pf-select__chip-remove"
                            aria-label="remove"
                            on:click=move |_| {
                                state.select(Some(without(&state.selection.get_untracked(), code)))
                            }
                        >
                            "×"
                        </button>
                    </span>
                }
            })
            .collect_view()
    };

    view! {
        <div class="pf-select">
            <div class="pf-select__control">
                {chips}
                <input
                    type="text"
                    class="pf-select__input"
                    placeholder="都道府県を入力してください"
                    prop:value=move || query.get()
                    on:input=move |ev| {
                        set_query.set(event_target_value(&ev));
                        set_open.set(true);
                    }
                    on:focus=move |_| set_open.set(true)
                    on:blur=move |_| set_open.set(false)
                />
                {move || {
                    if state.selection.get().is_empty() {
                        ().into_view()
                    } else {
                        view! {
                            <button
                                class="pf-select__clear"
                                aria-label="clear"
                                on:click=move |_| state.select(None)
                            >
                                "×"
                            </button>
                        }.into_view()
                    }
                }}
            </div>

            // Option list
            {move || {
                if !open.get() {
                    return ().into_view();
                }
                let options = options.get();
                if options.is_empty() {
                    view! {
                        <div class="pf-select__menu">
                            <div class="pf-select__empty">"No options"</div>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <ul class="pf-select__menu">
                            {options.into_iter().map(|option| {
                                let code = option.value;
                                view! {
                                    // mousedown fires before the input's blur closes the menu
                                    <li
                                        class="pf-select__option"
                                        on:mousedown=move |ev| {
                                            ev.prevent_default();
                                            state.select(Some(with_added(&state.selection.get_untracked(), code)));
                                            set_query.set(String::new());
                                        }
                                    >
                                        {option.label}
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    }.into_view()
                }
            }}
        </div>
    }
}
