use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde_json::Value;

use crate::discovery_response::Page;
use crate::query::Query;

const EVENTS_API_URL: &str = "https://app.ticketmaster.com/discovery/v2/events.json";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can return one page of search results.
pub trait PageSource {
    fn fetch_page(&self, query: &Query, page: u32) -> impl Future<Output = anyhow::Result<Page>>;
}

/// Discovery API over HTTP.
pub struct DiscoveryClient {
    http: reqwest::Client,
}

impl DiscoveryClient {
    pub fn new() -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http })
    }
}

impl PageSource for DiscoveryClient {
    async fn fetch_page(&self, query: &Query, page: u32) -> anyhow::Result<Page> {
        let response = self
            .http
            .get(EVENTS_API_URL)
            .query(&query.params(page))
            .send()
            .await
            .context("request to the Discovery API failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("failed to read Discovery API response")?;
        parse_response(status, &body)
    }
}

/// Turns a raw Discovery API response into a page, failing on non-2xx statuses and bad JSON.
fn parse_response(status: StatusCode, body: &str) -> anyhow::Result<Page> {
    if !status.is_success() {
        anyhow::bail!("Discovery API returned {status}: {body}");
    }
    serde_json::from_str(body).context("malformed Discovery API response")
}

/// Fetches every page for the query, in page order, and flattens the events.
///
/// Any failure aborts the whole fetch; events from earlier pages are dropped.
pub async fn fetch_all<S: PageSource>(source: &S, query: &Query) -> anyhow::Result<Vec<Value>> {
    let mut events = vec![];
    let mut page_number = 0;

    loop {
        let page = source
            .fetch_page(query, page_number)
            .await
            .with_context(|| format!("failed to fetch page {page_number}"))?;
        let info = *page.page();
        let total_pages = info.total_pages();
        let mut page_events = page.into_events();
        tracing::debug!(
            "Page {} of {total_pages} returned {} events (size {}, {} total)",
            info.number(),
            page_events.len(),
            info.size(),
            info.total_elements()
        );

        if page_events.is_empty() {
            break;
        }
        events.append(&mut page_events);

        if page_number + 1 >= total_pages {
            break;
        }
        page_number += 1;
    }

    tracing::info!("Fetched {} events in {} pages", events.len(), page_number + 1);
    Ok(events)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use serde_json::Value;
    use serde_json::json;

    use super::PageSource;
    use crate::discovery_response::Page;
    use crate::query::Query;

    /// Serves canned pages and records which pages were asked for.
    pub struct ScriptedSource {
        pages: Vec<anyhow::Result<Value>>,
        requested: RefCell<Vec<u32>>,
    }

    impl ScriptedSource {
        pub fn new(pages: Vec<anyhow::Result<Value>>) -> Self {
            Self {
                pages,
                requested: RefCell::new(vec![]),
            }
        }

        pub fn requested(&self) -> Vec<u32> {
            self.requested.borrow().clone()
        }
    }

    impl PageSource for ScriptedSource {
        async fn fetch_page(&self, _query: &Query, page: u32) -> anyhow::Result<Page> {
            self.requested.borrow_mut().push(page);
            match self.pages.get(page as usize) {
                Some(Ok(body)) => Ok(serde_json::from_value(body.clone())?),
                Some(Err(e)) => Err(anyhow::anyhow!("{e}")),
                None => anyhow::bail!("page {page} was not scripted"),
            }
        }
    }

    /// Builds a page body with `count` events numbered from `first`.
    pub fn page_body(
        number: u32,
        total_pages: u32,
        total: u64,
        first: usize,
        count: usize,
    ) -> Value {
        let events: Vec<Value> = (first..first + count)
            .map(|i| json!({ "id": format!("ev{i}"), "name": format!("Event {i}") }))
            .collect();
        let mut body = json!({
            "page": {
                "size": 200,
                "totalElements": total,
                "totalPages": total_pages,
                "number": number
            }
        });
        if count > 0 {
            body["_embedded"] = json!({ "events": events });
        }
        body
    }
}
