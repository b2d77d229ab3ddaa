//! Settings Page
//!
//! Ranking service address.

use leptos::*;

use crate::api;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<Result<(), String>>);

    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);
        api::set_api_base(&api_url.get());

        spawn_local(async move {
            set_test_result.set(Some(api::check_health().await));
            set_testing.set(false);
        });
    };

    let save_url = move |_| {
        api::set_api_base(&api_url.get());
        set_api_url.set(api::get_api_base());
    };

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
            </div>

            <section class="bg-gray-800 rounded-xl p-6 space-y-4">
                <h2 class="text-xl font-semibold">"Ranking service"</h2>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Service URL"</label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 bg-gray-700 rounded-lg px-4 py-3
                                   border border-gray-600 focus:border-primary-500 focus:outline-none"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="px-4 py-3 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                   rounded-lg font-medium transition-colors"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button
                            on:click=save_url
                            class="px-4 py-3 bg-primary-600 hover:bg-primary-700
                                   rounded-lg font-medium transition-colors"
                        >
                            "Save"
                        </button>
                    </div>
                </div>

                <div class="flex items-center space-x-2 text-sm">
                    <span class="text-gray-400">"Status:"</span>
                    {move || match test_result.get() {
                        Some(Ok(())) => view! { <span class="text-green-400">"Connected"</span> }.into_view(),
                        Some(Err(e)) => view! { <span class="text-red-400">{format!("Failed: {}", e)}</span> }.into_view(),
                        None => view! { <span class="text-gray-500">"Not tested"</span> }.into_view(),
                    }}
                </div>
            </section>

            <section class="bg-gray-800 rounded-xl p-6 space-y-2">
                <h2 class="text-xl font-semibold">"Session"</h2>
                <p class="text-gray-400 text-sm">
                    {move || {
                        let history = state.history.get();
                        if history.is_empty() {
                            "No places opened yet.".to_string()
                        } else {
                            let ids: Vec<String> = history.iter().map(|id| id.to_string()).collect();
                            format!("Opened: {}", ids.join(", "))
                        }
                    }}
                </p>
                <p class="text-gray-500 text-xs">"The history resets when the page reloads."</p>
            </section>
        </div>
    }
}
