//! `gargi config`: Show configuration.

use gargi_config::AppConfig;

pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    println!("# {}", AppConfig::config_dir().join("config.toml").display());
    println!("# model API key: {}", key_status(config.has_model_key()));
    println!("# search API key: {}", key_status(config.has_search_key()));
    println!();
    println!("{}", config.to_redacted_toml());
    Ok(())
}

pub fn defaults() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", AppConfig::default_toml());
    Ok(())
}

pub fn path() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = AppConfig::config_dir().join("config.toml");
    println!("{}", config_path.display());
    Ok(())
}

fn key_status(set: bool) -> &'static str {
    if set { "set" } else { "not set" }
}
