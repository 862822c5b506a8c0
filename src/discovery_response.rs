use getset::CopyGetters;
use getset::Getters;
use serde::Deserialize;
use serde_json::Value;

/// One page of the Discovery API events search.
#[derive(Clone, Debug, Deserialize, Getters)]
pub struct Page {
    #[serde(rename = "_embedded", default)]
    embedded: Option<Embedded>,
    #[serde(default)]
    #[getset(get = "pub")]
    page: PageInfo,
}

impl Page {
    /// Consumes the page, returning its events (empty when the API omitted them).
    pub fn into_events(self) -> Vec<Value> {
        self.embedded.map(|e| e.events).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Deserialize)]
struct Embedded {
    #[serde(default)]
    events: Vec<Value>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, CopyGetters)]
#[serde(rename_all = "camelCase", default)]
#[getset(get_copy = "pub")]
pub struct PageInfo {
    size: u32,
    total_elements: u64,
    total_pages: u32,
    number: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_events_and_page_metadata() {
        let page: Page = serde_json::from_value(json!({
            "_embedded": { "events": [{ "name": "A" }, { "name": "B" }] },
            "_links": { "self": { "href": "/discovery/v2/events.json?page=0" } },
            "page": { "size": 200, "totalElements": 2, "totalPages": 1, "number": 0 }
        }))
        .unwrap();

        assert_eq!(page.page().total_pages(), 1);
        assert_eq!(page.page().total_elements(), 2);
        assert_eq!(page.page().size(), 200);
        let events = page.into_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1]["name"], "B");
    }

    #[test]
    fn empty_result_has_no_embedded_block() {
        let page: Page = serde_json::from_value(json!({
            "page": { "size": 200, "totalElements": 0, "totalPages": 0, "number": 0 }
        }))
        .unwrap();

        assert_eq!(page.page().total_pages(), 0);
        assert!(page.into_events().is_empty());
    }

    #[test]
    fn missing_page_block_means_no_more_pages() {
        let page: Page = serde_json::from_value(json!({})).unwrap();
        assert_eq!(page.page().total_pages(), 0);
        assert_eq!(page.page().number(), 0);
    }

    #[test]
    fn events_are_passed_through_untouched() {
        let event = json!({
            "name": "Concert",
            "dates": { "start": { "localDate": "2026-10-20" } },
            "unknownField": [1, 2, 3]
        });
        let page: Page = serde_json::from_value(json!({
            "_embedded": { "events": [event.clone()] },
            "page": { "size": 200, "totalElements": 1, "totalPages": 1, "number": 0 }
        }))
        .unwrap();

        assert_eq!(page.into_events(), vec![event]);
    }
}
