use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use showfinder::client::{ArtistClient, DateRange};
use showfinder::models::Artist;
use showfinder::pipeline::{ArtistSearch, LoadError};

#[derive(Parser)]
#[command(name = "showfinder", version, about = "Look up an artist and their upcoming events")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch an artist's profile and upcoming events
    Search {
        /// Artist name, used verbatim in the lookup
        name: String,
        /// Earliest event date (YYYY-MM-DD); only applied together with --to
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        /// Latest event date (YYYY-MM-DD); only applied together with --from
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Print the autocomplete suggestion for a name fragment
    Suggest {
        fragment: String,
    },
}

fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Search { name, from, to } => search(&name, from, to).await,
        Command::Suggest { fragment } => suggest(&fragment).await,
    }
}

async fn search(name: &str, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("artist name must not be empty");
    }
    if from.is_some() != to.is_some() {
        eprintln!("only one of --from/--to given; requesting all events");
    }

    let mut session = ArtistSearch::new(ArtistClient::default(), name, DateRange::new(from, to));
    match session.load().await {
        Ok(()) => {
            render(session.artist());
            Ok(())
        }
        Err(err @ LoadError::Events(_)) => {
            // The profile landed before the event query failed; show it.
            render_profile(session.artist());
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

async fn suggest(fragment: &str) -> Result<()> {
    let client = ArtistClient::default();
    if let Some(name) = client.suggest(fragment.trim()).await {
        println!("{name}");
    }
    Ok(())
}

fn render(artist: &Artist) {
    render_profile(artist);
    if artist.events.is_empty() {
        println!("no upcoming events");
        return;
    }
    println!();
    println!(
        "{:<24} {:<26} {:<18} {:<20} {}",
        "artist", "datetime", "country", "city", "url"
    );
    for event in &artist.events {
        println!(
            "{:<24} {:<26} {:<18} {:<20} {}",
            artist.name, event.datetime, event.venue.country, event.venue.city, event.url
        );
    }
}

fn render_profile(artist: &Artist) {
    println!("{} ({})", artist.name, artist.url);
    println!(
        "followers: {}  upcoming events: {}",
        artist.tracker_count, artist.upcoming_event_count
    );
}
