//! `gargi serve`: Start the HTTP API server.

use gargi_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("⚡ Gargi Energy Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Upstream:  {}", config.upstream.base_url);
    println!(
        "   Chat:      {}",
        if config.has_model_key() {
            format!("{} / {}", config.model.provider, config.model.model)
        } else {
            "disabled (no model API key)".to_string()
        }
    );
    println!(
        "   Web search: {}",
        if config.has_search_key() { "enabled" } else { "disabled" }
    );

    gargi_gateway::start(config).await?;

    Ok(())
}
