use anyhow::Result;
use cratedig_beatport::{config, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  various_artists_marker: {}", config.various_artists_marker);
    println!(
        "  excluded_labels: {}",
        if config.excluded_labels.is_empty() {
            "<none>".to_string()
        } else {
            config.excluded_labels.join(", ")
        }
    );
    println!("  user_agent: {}", config.user_agent);
    println!("  request_timeout_secs: {}", config.request_timeout_secs);
    println!("  search_limit: {}", config.search_limit);
    println!("  logging.level: {:?}", config.logging.level());
    println!("  logging.coloured: {}", config.logging.coloured());
    println!("  logging.output: {:?}", config.logging.output());

    println!("\nPriority: CLI args > ENV vars (CRATEDIG_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure cratedig.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
