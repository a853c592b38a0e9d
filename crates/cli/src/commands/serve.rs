//! `r2skill serve` — Start the HTTP skill endpoint.

use r2skill_config::AppConfig;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        config.gateway.port = port;
    }

    println!("🤖 r2skill");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!(
        "   Store:     {} (table {}, region {})",
        config.persistence.backend, config.persistence.table_name, config.persistence.region
    );

    r2skill_gateway::start(config).await?;

    Ok(())
}
