//! Command line front end: resolve an address once, fetch the schedule, and
//! print every sensor the way a display integration would show it.

#![expect(
    clippy::print_stdout,
    reason = "command line tool reporting to stdout"
)]

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use chrono::Local;
use kliko_core::{
    coordinator::ScheduleCoordinator,
    locale::Language,
    model::Credentials,
    ports::ScheduleSource,
    render::{RenderConfig, Sensor},
};
use kliko_provider_hvc::HvcClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (postal_code, house_number, tag) = match args.as_slice() {
        [postal_code, house_number] => (postal_code, house_number, "nl"),
        [postal_code, house_number, tag] => (postal_code, house_number, tag.as_str()),
        _ => bail!("usage: kliko <postal-code> <house-number> [language-tag]"),
    };

    let credentials = Credentials::new(postal_code, house_number)?;
    let language = Language::from_tag(tag);

    let client = Arc::new(HvcClient::new().context("failed to build HTTP client")?);

    if !client.check_connection(&credentials).await {
        bail!("could not find an HVC address for {credentials}");
    }

    let coordinator = ScheduleCoordinator::new(client, credentials);
    let schedule = coordinator
        .refresh()
        .await
        .context("failed to fetch the waste schedule")?;

    let config = RenderConfig::new(language);
    let today = Local::now().date_naive();

    println!("Pickup schedule for {}", coordinator.credentials());
    for sensor in Sensor::ALL {
        let state = sensor
            .state(&schedule, today, &config)
            .unwrap_or_else(|| String::from("-"));
        println!("  {:<16} {state}", sensor.key());
    }

    Ok(())
}
