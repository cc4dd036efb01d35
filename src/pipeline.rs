use crate::client::{ArtistClient, DateRange};
use crate::models::{Artist, Event};
use crate::transport::TransportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("artist lookup failed: {0}")]
    Artist(#[source] TransportError),
    #[error("event lookup failed: {0}")]
    Events(#[source] TransportError),
}

/// One search session: holds the inputs, the load state, and the aggregate
/// being assembled. `load` takes `&mut self`, so overlapping loads on the same
/// search are ruled out at compile time; a repeat call starts over with a
/// fresh aggregate.
pub struct ArtistSearch {
    client: ArtistClient,
    name: String,
    range: DateRange,
    state: LoadState,
    artist: Artist,
}

impl ArtistSearch {
    pub fn new(client: ArtistClient, name: impl Into<String>, range: DateRange) -> Self {
        Self {
            client,
            name: name.into(),
            range,
            state: LoadState::Idle,
            artist: Artist::default(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn artist(&self) -> &Artist {
        &self.artist
    }

    /// Two strictly sequential queries: profile first, then events. A failed
    /// profile lookup suppresses the event query entirely and leaves the
    /// aggregate at its defaults. A failed event lookup keeps the profile
    /// fields that already landed, with the event collection empty; that
    /// partial state is deliberate, the profile is still worth showing.
    pub async fn load(&mut self) -> Result<(), LoadError> {
        self.artist = Artist::default();
        self.state = LoadState::Loading;

        let profile = match self.client.artist(&self.name).await {
            Ok(payload) => payload,
            Err(err) => {
                self.state = LoadState::Failed;
                return Err(LoadError::Artist(err));
            }
        };
        self.artist.apply_profile(profile);

        let events = match self.client.events(&self.name, &self.range).await {
            Ok(payload) => payload,
            Err(err) => {
                self.state = LoadState::Failed;
                return Err(LoadError::Events(err));
            }
        };

        // Response order is presentation order.
        self.artist.events = events.into_iter().map(Event::from).collect();
        self.state = LoadState::Ready;
        Ok(())
    }
}
