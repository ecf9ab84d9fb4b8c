use anyhow::{Context, Result};
use cratedig_beatport::{BeatportSource, Config};
use cratedig_core::{ArtistRole, ReleaseRecord, TrackRecord};

pub async fn run_release(config: Config, id_or_url: &str, json: bool) -> Result<()> {
    let source = BeatportSource::new(config).context("Failed to create Beatport client")?;
    let record = source
        .fetch_release(id_or_url)
        .await
        .with_context(|| format!("Failed to fetch {} release {}", source.source_name(), id_or_url))?;

    if json {
        let rendered =
            serde_json::to_string_pretty(&record).context("Failed to serialize release")?;
        println!("{rendered}");
    } else {
        print_release(&record);
    }

    Ok(())
}

fn print_release(record: &ReleaseRecord) {
    println!("{}", record.title);
    println!("{}\n", "=".repeat(record.title.chars().count()));

    println!("Label:    {}", record.label);
    if !record.catalog_number.is_empty() {
        println!("Catalog:  {}", record.catalog_number);
    }
    println!("Released: {} ({})", record.release_date, record.year);
    println!(
        "Genres:   {}",
        record
            .genres
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Cover:    {}", record.cover_url);

    println!("\nTracks ({}):", record.track_count());
    for track in record.iter_tracks() {
        println!("{}", track_line(track));
    }
}

fn track_line(track: &TrackRecord) -> String {
    let credits = |role: ArtistRole| {
        track
            .artists
            .iter()
            .filter(|a| a.role == role)
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let mains = credits(ArtistRole::Main);
    let remixers = credits(ArtistRole::Remixer);

    let mut line = format!(
        "  {}-{:02}  {} - {}",
        track.disc_number, track.track_number, mains, track.title
    );
    if !remixers.is_empty() {
        line = format!("{line} [remix: {remixers}]");
    }
    if let Some(isrc) = &track.isrc {
        line = format!("{line} ({isrc})");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use cratedig_core::ArtistCredit;

    #[test]
    fn test_track_line() {
        let track = TrackRecord {
            track_number: 2,
            disc_number: 1,
            artists: vec![
                ArtistCredit::main("A"),
                ArtistCredit::main("B"),
                ArtistCredit::remixer("C"),
            ],
            title: "Sunrise (C Remix)".to_string(),
            isrc: Some("GBXXX2100001".to_string()),
            streamable: true,
        };
        assert_eq!(
            track_line(&track),
            "  1-02  A, B - Sunrise (C Remix) [remix: C] (GBXXX2100001)"
        );
    }
}
