use std::error::Error as _;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use aether::config::Config;
use aether::provision;
use aether_compute::client::{Client, ClientConfig, SCOPES};
use aether_compute::error::Error;

async fn execute(config: &Config) -> Result<(), Error> {
    let store = config.token_store()?;
    let mut client_config = ClientConfig::default()
        .with_project(config.project_id.as_str(), config.zone.as_str())
        .with_auth_store(&config.client_secrets, &SCOPES, store)
        .await?;
    client_config.iam_retry = config.iam_retry();
    client_config.debug = config.debug;

    let client = Client::new(client_config);
    provision::run(&client, config).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::parse();
    tracing::debug!("{:?}", config);

    tokio::select! {
        result = execute(&config) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let mut message = e.to_string();
                let mut source = e.source();
                while let Some(cause) = source {
                    message.push_str(&format!(": {cause}"));
                    source = cause.source();
                }
                tracing::error!("{}", message);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::warn!("interrupted, resources created so far are left in place");
            ExitCode::from(130)
        }
    }
}
