use serde::Serialize;

use crate::client::{ArtistPayload, EventPayload, OfferPayload, VenuePayload};

/// Root of the aggregate produced by one search: profile fields plus the
/// ordered event collection. A new search builds a fresh tree; nothing is
/// updated incrementally.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub url: String,
    pub image_url: String,
    pub thumb_url: String,
    pub facebook_page_url: String,
    pub mbid: String,
    pub tracker_count: u64,
    pub upcoming_event_count: u64,
    pub events: Vec<Event>,
}

impl Artist {
    /// Assign profile fields verbatim from a decoded payload. The event
    /// collection is untouched; events arrive from the separate event query.
    pub fn apply_profile(&mut self, payload: ArtistPayload) {
        self.id = payload.id;
        self.name = payload.name;
        self.url = payload.url;
        self.image_url = payload.image_url;
        self.thumb_url = payload.thumb_url;
        self.facebook_page_url = payload.facebook_page_url;
        self.mbid = payload.mbid;
        self.tracker_count = payload.tracker_count;
        self.upcoming_event_count = payload.upcoming_event_count;
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Event {
    pub id: String,
    pub artist_id: String,
    pub url: String,
    pub on_sale_datetime: String,
    pub datetime: String,
    pub venue: Venue,
    pub offers: Vec<Offer>,
    pub lineup: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Venue {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Offer {
    pub kind: String,
    pub url: String,
    pub status: String,
}

impl From<EventPayload> for Event {
    fn from(payload: EventPayload) -> Self {
        Self {
            id: payload.id,
            artist_id: payload.artist_id,
            url: payload.url,
            on_sale_datetime: payload.on_sale_datetime,
            datetime: payload.datetime,
            // Every event owns a freshly built venue and offer list, even when
            // the payload omitted them.
            venue: Venue::from(payload.venue),
            offers: payload.offers.into_iter().map(Offer::from).collect(),
            lineup: payload.lineup,
        }
    }
}

impl From<VenuePayload> for Venue {
    fn from(payload: VenuePayload) -> Self {
        Self {
            name: payload.name,
            latitude: payload.latitude,
            longitude: payload.longitude,
            city: payload.city,
            region: payload.region,
            country: payload.country,
        }
    }
}

impl From<OfferPayload> for Offer {
    fn from(payload: OfferPayload) -> Self {
        Self {
            kind: payload.kind,
            url: payload.url,
            status: payload.status,
        }
    }
}
