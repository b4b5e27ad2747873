use catalog_bridge::{logging, server, BridgeConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = BridgeConfig::from_env()?;
    logging::init_subscriber(&config)?;

    tracing::info!(
        version = catalog_bridge::clients::BRIDGE_VERSION,
        api_version = %config.api_version(),
        scopes = %config.scopes(),
        "starting catalog bridge"
    );

    server::run_server(config).await?;
    Ok(())
}
