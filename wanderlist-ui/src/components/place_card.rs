//! Place Card Component
//!
//! One entry of the catalog grid. Clicking it records the click and opens
//! the place.

use leptos::*;
use leptos_router::use_navigate;

use crate::state::global::{GlobalState, Place};

const PREVIEW_CHARS: usize = 140;

/// Catalog entry card
#[component]
pub fn PlaceCard(place: Place) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let id = place.id;
    let path = place.path();
    let open = move |_| {
        state.record_click(id);
        navigate(&path, Default::default());
    };

    view! {
        <div
            on:click=open
            class="bg-gray-800 rounded-lg overflow-hidden cursor-pointer border border-gray-700
                   hover:border-gray-500 transition"
        >
            <img src=place.image_link alt=place.title.clone() class="w-full h-40 object-cover" />
            <div class="p-4">
                <h2 class="text-lg font-semibold">{place.title}</h2>
                <p class="text-gray-400 text-sm mt-2">{preview(&place.description)}</p>
            </div>
        </div>
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("Short"), "Short");

        let long = "word ".repeat(50);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= PREVIEW_CHARS + 3);
    }
}
