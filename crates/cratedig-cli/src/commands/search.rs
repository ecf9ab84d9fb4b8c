use anyhow::{Context, Result};
use cratedig_beatport::{BeatportSource, Config};

pub async fn run_search(config: Config, query: &str, limit: usize) -> Result<()> {
    log::info!("Searching for {:?} (limit {})", query, limit);

    let source = BeatportSource::new(config).context("Failed to create Beatport client")?;
    let (name, results) = source
        .search(query, limit)
        .await
        .with_context(|| format!("{} search for {:?} failed", source.source_name(), query))?;

    if results.is_empty() {
        println!("No {} releases found for {:?}", name, query);
        return Ok(());
    }

    println!("{} results from {}:\n", results.len(), name);
    for (release_id, hit) in results {
        println!("  {:>10}  {}", release_id, hit.display);
    }

    Ok(())
}
