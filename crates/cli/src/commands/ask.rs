//! `gargi ask`: Single-question chat mode.

use gargi_config::AppConfig;
use gargi_core::chat::ChatRequest;
use gargi_gateway::AppState;

pub async fn run(query: &str, web: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let state = AppState::from_config(&config);

    // Fail early with setup instructions
    if !state.orchestrator.has_provider() {
        eprintln!();
        eprintln!("  ERROR: No model API key configured!");
        eprintln!();
        eprintln!("  Set GEMINI_API_KEY (or GARGI_MODEL_API_KEY), or add it to:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No model API key found. See above for setup instructions.".into());
    }

    eprint!("  Thinking...");
    let response = state
        .orchestrator
        .handle(ChatRequest::new(query).with_web_search(web))
        .await;
    eprint!("\r              \r");
    let response = response?;

    println!("{}", response.response);
    if !response.sources.is_empty() {
        println!();
        println!("  Sources:");
        for source in &response.sources {
            println!("    - {source}");
        }
    }

    Ok(())
}
