use browsing_client::api::ServerApi;
use browsing_client::config::{EndpointSource, config};
use common::tracing::{init_tracing, init_tracing_pretty};
use std::env;
use tracing::info;

const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match env::var(LOG_FORMAT_VAR).as_deref() {
        Ok("json") => init_tracing(),
        _ => init_tracing_pretty(),
    }

    let config = config();
    let from_env = config.source() == EndpointSource::Environment;
    info!(server_path = %config.server_path(), from_env, "Server endpoint resolved");

    // Fail early on endpoints the client could never reach
    let api = ServerApi::new(config)?;
    info!(base_url = %api.base_url(), "Endpoint usable as base URL");

    println!("{}", serde_json::to_string(config)?);
    Ok(())
}
