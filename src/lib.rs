pub mod client;
pub mod models;
pub mod pipeline;
pub mod transport;

pub use client::{ArtistClient, DateRange};
pub use models::{Artist, Event, Offer, Venue};
pub use pipeline::{ArtistSearch, LoadError, LoadState};
pub use transport::TransportError;
