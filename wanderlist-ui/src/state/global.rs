//! Global Application State
//!
//! Reactive state management using Leptos signals.

use leptos::*;

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Ids of opened places, oldest first. Never deduplicated or capped.
    pub history: RwSignal<Vec<i64>>,
}

/// A travel place as served by the ranking service
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize, PartialEq)]
pub struct Place {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_link: String,
}

impl Place {
    /// Shown by the detail page until its request succeeds
    pub fn placeholder() -> Self {
        Self {
            id: 1,
            title: "string".to_string(),
            description: "string".to_string(),
            image_link: "a".to_string(),
        }
    }

    /// Element 0 of a lookup response, the placeholder when there is none
    pub fn first_or_placeholder(found: Vec<Place>) -> Self {
        found.into_iter().next().unwrap_or_else(Self::placeholder)
    }

    /// Route of this place's detail page
    pub fn path(&self) -> String {
        place_path(&self.id.to_string())
    }
}

/// `/place/<id>` with the id as given
pub fn place_path(id: &str) -> String {
    format!("/place/{}", id)
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        history: create_rw_signal(Vec::new()),
    };

    provide_context(state);
}

impl GlobalState {
    /// Append a click to the history
    pub fn record_click(&self, id: i64) {
        self.history.update(|history| history.push(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let place = Place::placeholder();
        assert_eq!(place.id, 1);
        assert_eq!(place.title, "string");
        assert_eq!(place.image_link, "a");
    }

    #[test]
    fn test_first_or_placeholder() {
        assert_eq!(Place::first_or_placeholder(Vec::new()), Place::placeholder());

        let found = vec![
            Place {
                id: 12,
                title: "Kirovsk".to_string(),
                description: String::new(),
                image_link: String::new(),
            },
            Place::placeholder(),
        ];
        assert_eq!(Place::first_or_placeholder(found).id, 12);
    }

    #[test]
    fn test_place_path_is_verbatim() {
        assert_eq!(place_path("42"), "/place/42");
        assert_eq!(place_path("abc"), "/place/abc");

        let place = Place {
            id: 7,
            title: "Khibiny".to_string(),
            description: String::new(),
            image_link: String::new(),
        };
        assert_eq!(place.path(), "/place/7");
    }

    #[test]
    fn test_place_wire_format() {
        let place: Place = serde_json::from_str(
            r#"{"id": 3, "title": "Teriberka", "description": "Coast", "image_link": "http://img"}"#,
        )
        .unwrap();
        assert_eq!(place.id, 3);
        assert_eq!(place.image_link, "http://img");
    }
}
