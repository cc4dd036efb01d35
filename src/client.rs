use chrono::NaiveDate;
use reqwest::Url;
use serde::{Deserialize, Deserializer};

use crate::transport::{self, TransportError};

pub const DEFAULT_API_ROOT: &str = "https://rest.bandsintown.com";
pub const DEFAULT_APP_ID: &str = "test";

/// Optional date bounds for the event query. The upstream API only accepts a
/// full `start,end` pair, so a partial range requests all events instead of
/// clamping to an open-ended one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// Client for the two artist endpoints: single-artist lookup and event list.
/// The artist name is embedded in the URL path; beyond the URL library's
/// percent-escaping no validation happens here, that is the caller's job.
#[derive(Debug, Clone)]
pub struct ArtistClient {
    api_root: String,
    app_id: String,
}

impl Default for ArtistClient {
    fn default() -> Self {
        let api_root = std::env::var("SHOWFINDER_API_ROOT")
            .unwrap_or_else(|_| DEFAULT_API_ROOT.to_string());
        let app_id =
            std::env::var("SHOWFINDER_APP_ID").unwrap_or_else(|_| DEFAULT_APP_ID.to_string());
        Self::new(api_root, app_id)
    }
}

impl ArtistClient {
    pub fn new(api_root: impl Into<String>, app_id: impl Into<String>) -> Self {
        let mut api_root = api_root.into();
        while api_root.ends_with('/') {
            api_root.pop();
        }
        Self {
            api_root,
            app_id: app_id.into(),
        }
    }

    pub async fn artist(&self, name: &str) -> Result<ArtistPayload, TransportError> {
        transport::fetch_json(self.artist_url(name)?).await
    }

    pub async fn events(
        &self,
        name: &str,
        range: &DateRange,
    ) -> Result<Vec<EventPayload>, TransportError> {
        transport::fetch_json(self.events_url(name, range)?).await
    }

    /// Autocomplete: the looked-up artist's canonical name is the single
    /// suggestion (exact match, not a prefix search). An empty fragment
    /// short-circuits without a request, and a failed lookup is simply "no
    /// suggestion".
    pub async fn suggest(&self, fragment: &str) -> Option<String> {
        if fragment.is_empty() {
            return None;
        }
        self.artist(fragment).await.ok().map(|payload| payload.name)
    }

    pub(crate) fn artist_url(&self, name: &str) -> Result<Url, TransportError> {
        let mut url = parse_endpoint(&format!("{}/artists/{}", self.api_root, name))?;
        url.query_pairs_mut().append_pair("app_id", &self.app_id);
        Ok(url)
    }

    pub(crate) fn events_url(&self, name: &str, range: &DateRange) -> Result<Url, TransportError> {
        let mut url = parse_endpoint(&format!("{}/artists/{}/events", self.api_root, name))?;
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("app_id", &self.app_id);
        if let Some((start, end)) = range.bounds() {
            pairs.append_pair(
                "date",
                &format!("{},{}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d")),
            );
        }
        drop(pairs);
        Ok(url)
    }
}

fn parse_endpoint(raw: &str) -> Result<Url, TransportError> {
    Url::parse(raw).map_err(|err| TransportError::Url(err.to_string()))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistPayload {
    #[serde(deserialize_with = "stringy")]
    pub id: String,
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub thumb_url: String,
    pub facebook_page_url: String,
    pub mbid: String,
    pub tracker_count: u64,
    pub upcoming_event_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventPayload {
    #[serde(deserialize_with = "stringy")]
    pub id: String,
    #[serde(deserialize_with = "stringy")]
    pub artist_id: String,
    pub url: String,
    pub on_sale_datetime: String,
    pub datetime: String,
    pub venue: VenuePayload,
    pub offers: Vec<OfferPayload>,
    pub lineup: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenuePayload {
    pub name: String,
    #[serde(deserialize_with = "stringy")]
    pub latitude: String,
    #[serde(deserialize_with = "stringy")]
    pub longitude: String,
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OfferPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
    pub status: String,
}

// The API is inconsistent about ids and coordinates: sometimes JSON strings,
// sometimes bare numbers. Accept either and keep the string form.
fn stringy<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stringy {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Stringy::deserialize(deserializer)? {
        Stringy::Text(value) => value,
        Stringy::Int(value) => value.to_string(),
        Stringy::Float(value) => value.to_string(),
    })
}
