use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use showfinder::client::{ArtistClient, DateRange};
use showfinder::pipeline::{ArtistSearch, LoadError, LoadState};
use showfinder::transport::TransportError;

const ARTIST_BODY: &str = r#"
{
    "id": "510",
    "name": "Radiohead",
    "url": "https://www.bandsintown.com/a/510",
    "image_url": "https://photos.example.com/big.jpg",
    "thumb_url": "https://photos.example.com/thumb.jpg",
    "facebook_page_url": "https://www.facebook.com/radiohead",
    "mbid": "a74b1b7f-71a5-4011-9441-d0b5e4122711",
    "tracker_count": 4067954,
    "upcoming_event_count": 2
}
"#;

const EVENTS_BODY: &str = r#"
[
    {
        "id": "103",
        "artist_id": "510",
        "url": "https://www.bandsintown.com/e/103",
        "on_sale_datetime": "2024-01-15T10:00:00",
        "datetime": "2024-03-01T20:00:00",
        "venue": {
            "name": "O2 Arena",
            "latitude": "51.5030045",
            "longitude": "0.0032913",
            "city": "London",
            "region": "",
            "country": "United Kingdom"
        },
        "offers": [
            {"type": "Tickets", "url": "https://tickets.example.com/1", "status": "available"},
            {"type": "VIP", "url": "https://tickets.example.com/2", "status": "available"}
        ],
        "lineup": ["Radiohead", "The Smile"]
    },
    {
        "id": "104",
        "artist_id": "510",
        "url": "https://www.bandsintown.com/e/104",
        "on_sale_datetime": "",
        "datetime": "2024-03-03T20:00:00",
        "venue": {
            "name": "AccorHotels Arena",
            "latitude": "48.8385258",
            "longitude": "2.3786199",
            "city": "Paris",
            "region": "",
            "country": "France"
        },
        "offers": [],
        "lineup": ["Radiohead"]
    }
]
"#;

fn json_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "application/json")
}

async fn mount_artist(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead"))
        .respond_with(json_response(ARTIST_BODY))
        .mount(server)
        .await;
}

#[tokio::test]
async fn full_load_reaches_ready_and_preserves_event_order() {
    let server = MockServer::start().await;
    mount_artist(&server).await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead/events"))
        .respond_with(json_response(EVENTS_BODY))
        .mount(&server)
        .await;

    let client = ArtistClient::new(server.uri(), "test");
    let mut session = ArtistSearch::new(client, "Radiohead", DateRange::default());
    assert_eq!(session.state(), LoadState::Idle);

    session.load().await.expect("load succeeds");
    assert_eq!(session.state(), LoadState::Ready);

    let artist = session.artist();
    assert_eq!(artist.name, "Radiohead");
    assert_eq!(artist.tracker_count, 4_067_954);
    assert_eq!(artist.events.len(), 2);
    assert_eq!(artist.events[0].id, "103");
    assert_eq!(artist.events[1].id, "104");
    assert_eq!(artist.events[0].venue.city, "London");
    assert_eq!(artist.events[1].venue.city, "Paris");
    assert_eq!(artist.events[0].offers.len(), 2);
    assert_eq!(artist.events[0].offers[0].kind, "Tickets");
    assert_eq!(artist.events[0].offers[1].kind, "VIP");
    assert!(artist.events[1].offers.is_empty());
}

#[tokio::test]
async fn full_date_range_is_forwarded_comma_joined() {
    let server = MockServer::start().await;
    mount_artist(&server).await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead/events"))
        .and(query_param("date", "2024-01-01,2024-06-01"))
        .respond_with(json_response(EVENTS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::new(
        "2024-01-01".parse().ok(),
        "2024-06-01".parse().ok(),
    );
    let client = ArtistClient::new(server.uri(), "test");
    let mut session = ArtistSearch::new(client, "Radiohead", range);
    session.load().await.expect("load succeeds");
    assert_eq!(session.state(), LoadState::Ready);
}

#[tokio::test]
async fn partial_date_range_requests_all_events() {
    let server = MockServer::start().await;
    mount_artist(&server).await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead/events"))
        .and(query_param_is_missing("date"))
        .respond_with(json_response(EVENTS_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let range = DateRange::new("2024-01-01".parse().ok(), None);
    let client = ArtistClient::new(server.uri(), "test");
    let mut session = ArtistSearch::new(client, "Radiohead", range);
    session.load().await.expect("load succeeds");
}

#[tokio::test]
async fn failed_artist_lookup_skips_event_query_and_keeps_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead/events"))
        .respond_with(json_response(EVENTS_BODY))
        .expect(0)
        .mount(&server)
        .await;

    let client = ArtistClient::new(server.uri(), "test");
    let mut session = ArtistSearch::new(client, "Radiohead", DateRange::default());
    let err = session.load().await.expect_err("load fails");

    assert!(matches!(
        err,
        LoadError::Artist(TransportError::Status(404))
    ));
    assert_eq!(session.state(), LoadState::Failed);
    assert_eq!(session.artist().name, "");
    assert!(session.artist().events.is_empty());
}

#[tokio::test]
async fn failed_event_lookup_keeps_profile_with_empty_events() {
    let server = MockServer::start().await;
    mount_artist(&server).await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead/events"))
        .respond_with(ResponseTemplate::new(500).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let client = ArtistClient::new(server.uri(), "test");
    let mut session = ArtistSearch::new(client, "Radiohead", DateRange::default());
    let err = session.load().await.expect_err("load fails");

    assert!(matches!(
        err,
        LoadError::Events(TransportError::Status(500))
    ));
    assert_eq!(session.state(), LoadState::Failed);
    assert_eq!(session.artist().name, "Radiohead");
    assert_eq!(session.artist().tracker_count, 4_067_954);
    assert!(session.artist().events.is_empty());
}

#[tokio::test]
async fn reload_replaces_the_previous_aggregate() {
    let server = MockServer::start().await;
    mount_artist(&server).await;
    Mock::given(method("GET"))
        .and(path("/artists/Radiohead/events"))
        .respond_with(json_response(EVENTS_BODY))
        .mount(&server)
        .await;

    let client = ArtistClient::new(server.uri(), "test");
    let mut session = ArtistSearch::new(client, "Radiohead", DateRange::default());
    session.load().await.expect("first load");
    session.load().await.expect("second load");

    // Starting over, not appending to the first tree.
    assert_eq!(session.artist().events.len(), 2);
    assert_eq!(session.state(), LoadState::Ready);
}
