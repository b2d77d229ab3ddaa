//! Place Detail Page
//!
//! A single place, looked up by the `:id` route parameter.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::components::Loading;
use crate::state::global::Place;

/// Detail page component
#[component]
pub fn PlaceDetail() -> impl IntoView {
    let params = use_params_map();
    let id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let current_id = move || params.with_untracked(|p| p.get("id").cloned().unwrap_or_default());

    let place = create_rw_signal(Place::placeholder());
    let loading = create_rw_signal(false);

    // Every id starts from the placeholder; a failed or empty lookup leaves it shown
    create_effect(move |_| {
        let id = id();
        place.set(Place::placeholder());
        loading.set(true);

        spawn_local(async move {
            let result = api::fetch_place(&id).await;

            // A newer id owns the page now
            if current_id() != id {
                return;
            }

            match result {
                Ok(found) => {
                    if found.is_empty() {
                        web_sys::console::warn_1(&format!("No place with id {}", id).into());
                    }
                    place.set(Place::first_or_placeholder(found));
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch place {}: {}", id, e).into());
                }
            }

            loading.set(false);
        });
    });

    view! {
        <div class="space-y-6 max-w-3xl">
            <A href="/places" class="text-sm text-gray-400 hover:text-white">"< All places"</A>

            {move || loading.get().then(|| view! { <Loading /> })}

            {move || place.with(|place| view! {
                <article class="space-y-4">
                    <img
                        src=place.image_link.clone()
                        alt=place.title.clone()
                        class="w-full max-h-96 object-cover rounded-lg"
                    />
                    <h1 class="text-3xl font-bold">{place.title.clone()}</h1>
                    <p class="text-gray-300 whitespace-pre-line">{place.description.clone()}</p>
                </article>
            })}
        </div>
    }
}
