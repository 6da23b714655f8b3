//! `gargi fetch`: Print one NPP resource.

use gargi_config::AppConfig;
use gargi_gateway::AppState;

pub async fn run(resource: &str, raw: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let state = AppState::from_config(&config);

    let value = match state.proxy.get_resource(resource).await {
        Ok(value) => value,
        Err(e) => {
            eprintln!("  ❌ {e}");
            eprintln!(
                "  Known resources: {}",
                state.proxy.catalog().names().join(", ")
            );
            return Err(e.into());
        }
    };

    let out = if raw {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{out}");

    Ok(())
}
