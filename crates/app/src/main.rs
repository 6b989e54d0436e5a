use std::sync::Arc;

use anyhow::Context;

use billdesk_app::{AppConfig, AppServices};
use billdesk_invoicing::InMemoryEditSource;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("loading configuration")?;
    billdesk_observability::init(config.log_format);

    let services = AppServices::boot(&config, Arc::new(InMemoryEditSource::new()))?;

    let map = services
        .gate()
        .policy_map()
        .context("gate has no policy mapping after boot")?;
    println!("{}", serde_json::to_string_pretty(map)?);

    Ok(())
}
