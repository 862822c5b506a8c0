use std::sync::LazyLock;

use chrono::Days;
use chrono::NaiveDate;
use getset::Getters;
use regex::Regex;

/// Length of the search window, in days from today.
pub const WINDOW_DAYS: u64 = 14;
/// Largest page size the Discovery API accepts.
pub const PAGE_SIZE: u32 = 200;

// SAFETY: The pattern is a constant and known to compile
static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// An events search over a fixed 14 day window.
#[derive(Clone, Debug, Getters)]
pub struct Query {
    api_key: String,
    country_code: String,
    city: Option<String>,
    keyword: Option<String>,
    #[getset(get = "pub")]
    start_date: NaiveDate,
    #[getset(get = "pub")]
    end_date: NaiveDate,
}

impl Query {
    pub fn new(
        api_key: impl Into<String>,
        country_code: &str,
        city: Option<String>,
        today: NaiveDate,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            country_code: country_code.trim().to_ascii_uppercase(),
            city: non_blank(city),
            keyword: None,
            start_date: today,
            end_date: today + Days::new(WINDOW_DAYS),
        }
    }

    /// Restricts the search to an artist or free-text keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: Option<String>) -> Self {
        self.keyword = non_blank(keyword);
        self
    }

    pub fn start_date_time(&self) -> String {
        self.start_date.format("%Y-%m-%dT00:00:00Z").to_string()
    }

    pub fn end_date_time(&self) -> String {
        self.end_date.format("%Y-%m-%dT23:59:59Z").to_string()
    }

    /// Query string parameters for the given page.
    pub fn params(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("countryCode", self.country_code.clone()),
        ];
        if let Some(city) = &self.city {
            params.push(("city", city.clone()));
        }
        if let Some(keyword) = &self.keyword {
            params.push(("keyword", keyword.clone()));
        }
        params.extend([
            ("startDateTime", self.start_date_time()),
            ("endDateTime", self.end_date_time()),
            ("size", PAGE_SIZE.to_string()),
            ("page", page.to_string()),
            ("sort", "date,asc".to_string()),
        ]);
        params
    }

    /// Human readable location, e.g. `Amsterdam, NL` or `NL`.
    pub fn location(&self) -> String {
        match &self.city {
            Some(city) => format!("{city}, {}", self.country_code),
            None => self.country_code.clone(),
        }
    }

    pub fn output_file_name(&self) -> String {
        format!(
            "events_{}{}{}_{}.json",
            self.country_code.to_ascii_lowercase(),
            slug_part(self.city.as_deref()),
            slug_part(self.keyword.as_deref()),
            self.start_date.format("%Y%m%d"),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `_<slug>` for a file name, or nothing when the text has no usable characters.
fn slug_part(text: Option<&str>) -> String {
    let slug = text
        .map(|t| {
            NON_ALNUM
                .replace_all(&t.to_lowercase(), "_")
                .trim_matches('_')
                .to_string()
        })
        .unwrap_or_default();
    if slug.is_empty() {
        slug
    } else {
        format!("_{slug}")
    }
}
