//! Places Page
//!
//! The catalog, ranked against the click history.

use leptos::*;

use crate::api;
use crate::components::loading::CardSkeleton;
use crate::components::PlaceCard;
use crate::state::global::{GlobalState, Place};

/// Catalog page component
#[component]
pub fn Places() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let places = create_rw_signal(Vec::<Place>::new());
    let loaded = create_rw_signal(false);

    // Fetch once on mount; later clicks navigate away before they matter
    create_effect(move |_| {
        let history = state.history.get_untracked();
        spawn_local(async move {
            match api::fetch_places(&history).await {
                Ok(ranked) => places.set(ranked),
                Err(e) => {
                    // Keep whatever was shown before
                    web_sys::console::error_1(&format!("Failed to fetch places: {}", e).into());
                }
            }

            loaded.set(true);
        });
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Places"</h1>
                <p class="text-gray-400 mt-1">"Picked for you from what you opened so far"</p>
            </div>

            {move || {
                if !loaded.get() {
                    view! { <CardSkeleton /> }.into_view()
                } else if places.with(Vec::is_empty) {
                    view! {
                        <p class="text-gray-400">"No places to show."</p>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                            <For
                                each=move || places.get()
                                key=|place| place.id
                                children=|place| view! { <PlaceCard place=place /> }
                            />
                        </div>
                    }.into_view()
                }
            }}
        </div>
    }
}
