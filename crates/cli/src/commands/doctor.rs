//! `tickerchat doctor` — Diagnose configuration and provider health.

use tickerchat_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("tickerchat doctor — diagnostics");
    println!("===============================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = match AppConfig::load() {
        Ok(config) => {
            if config_path.exists() {
                println!("  ✅ Config file valid ({})", config_path.display());
            } else {
                println!("  ✅ No config file, using defaults");
            }
            config
        }
        Err(e) => {
            println!("  ❌ Config file invalid: {e}");
            return Err(e.into());
        }
    };

    // Check API key (Ollama needs none)
    if config.default_provider == "ollama" {
        println!("  ✅ Provider 'ollama' needs no API key");
    } else if config.has_api_key() || config.provider_api_key(&config.default_provider).is_some() {
        println!("  ✅ API key configured");
    } else {
        println!(
            "  ⚠️  No API key for provider '{}' — set TICKERCHAT_API_KEY",
            config.default_provider
        );
        issues += 1;
    }

    // Check the provider end-to-end
    match tickerchat_providers::build_from_config(&config) {
        Ok(provider) => {
            println!("  ✅ Provider '{}' configured", provider.name());
            match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider reachable"),
                Ok(false) => {
                    println!("  ⚠️  Provider responded but reported unhealthy");
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider unreachable: {e}");
                    issues += 1;
                }
            }
        }
        Err(e) => {
            println!("  ❌ Provider configuration failed: {e}");
            issues += 1;
        }
    }

    // Check tools
    let registry = tickerchat_tools::default_registry();
    let mut names = registry.names();
    names.sort_unstable();
    println!("  ✅ Tools registered: {}", names.join(", "));

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
