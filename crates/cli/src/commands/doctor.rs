//! `gargi doctor`: Diagnose system health.

use gargi_config::AppConfig;
use gargi_gateway::AppState;
use gargi_npp::resources::INSTALLED_CAPACITY;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Gargi Doctor: System Diagnostics");
    println!("====================================\n");

    let mut issues = 0;

    println!("  ✅ Rust binary running");

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  ✅ Config file found at {}", config_path.display());
    } else {
        println!("  ℹ️  No config file, using defaults and environment");
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!("\n  ⚠️  1 issue(s) found. See above for details.");
            return Ok(());
        }
    };

    if config.has_model_key() {
        println!("  ✅ Model API key configured ({})", config.model.provider);
    } else {
        println!("  ⚠️  No model API key, set GEMINI_API_KEY; chat will be unavailable");
        issues += 1;
    }

    if config.has_search_key() {
        println!("  ✅ Search API key configured");
    } else {
        println!("  ℹ️  No search API key, web search disabled (set TAVILY_API_KEY)");
    }

    let state = AppState::from_config(&config);
    match state.proxy.get_resource(INSTALLED_CAPACITY).await {
        Ok(_) => println!("  ✅ Upstream reachable ({})", config.upstream.base_url),
        Err(e) => {
            println!("  ❌ Upstream check failed: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
