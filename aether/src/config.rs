use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use aether_compute::client::aether_auth::error::Error as AuthError;
use aether_compute::client::aether_auth::token_store::FileTokenStore;
use aether_compute::iam::RetrySetting;

/// Provision a Compute Engine VM with its network, firewall rules, service account and IAM bindings.
#[derive(Parser, Debug, Clone)]
#[command(name = "aether", version)]
pub struct Config {
    /// Project to create the resources in
    #[arg(long, env = "AETHER_PROJECT_ID", default_value = "example")]
    pub project_id: String,

    /// Zone of the instance
    #[arg(long, env = "AETHER_ZONE", default_value = "europe-west6-a")]
    pub zone: String,

    /// Name of the instance, also used as the service account id
    #[arg(long, env = "AETHER_INSTANCE_NAME", default_value = "aether-009")]
    pub instance_name: String,

    /// Name of the VPC network [default: <INSTANCE_NAME>-net]
    #[arg(long, env = "AETHER_NETWORK_NAME")]
    pub network_name: Option<String>,

    /// User granted login and admin access on the instance
    #[arg(long, env = "AETHER_OWNER_EMAIL", default_value = "owner@example.com")]
    pub owner_email: String,

    /// Boot disk image
    #[arg(
        long,
        env = "AETHER_SOURCE_IMAGE",
        default_value = "projects/rocky-linux-cloud/global/images/family/rocky-linux-8"
    )]
    pub source_image: String,

    #[arg(long, env = "AETHER_MACHINE_TYPE", default_value = "e2-standard-4")]
    pub machine_type: String,

    /// OAuth client secrets downloaded from the cloud console
    #[arg(long, env = "AETHER_CLIENT_SECRETS", default_value = "./client_secret.json")]
    pub client_secrets: PathBuf,

    /// Where the OAuth token is cached [default: ~/.config/aether/token.json]
    #[arg(long, env = "AETHER_TOKEN_CACHE")]
    pub token_cache: Option<PathBuf>,

    /// How often an IAM policy update is retried after losing a concurrent write
    #[arg(long, env = "AETHER_IAM_RETRIES", default_value_t = 0)]
    pub iam_retries: usize,

    /// Log every API response body
    #[arg(long, env = "AETHER_DEBUG")]
    pub debug: bool,
}

impl Config {
    pub fn network(&self) -> String {
        self.network_name
            .clone()
            .unwrap_or_else(|| format!("{}-net", self.instance_name))
    }

    pub fn service_account_display_name(&self) -> String {
        format!("{}'s account", self.instance_name)
    }

    pub fn token_store(&self) -> Result<FileTokenStore, AuthError> {
        match &self.token_cache {
            Some(path) => Ok(FileTokenStore::new(path)),
            None => FileTokenStore::default_location(),
        }
    }

    pub fn iam_retry(&self) -> Option<RetrySetting> {
        (self.iam_retries > 0).then(|| RetrySetting {
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            max_retries: self.iam_retries,
        })
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use crate::config::Config;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["aether"]).unwrap();
        assert_eq!(config.project_id, "example");
        assert_eq!(config.zone, "europe-west6-a");
        assert_eq!(config.instance_name, "aether-009");
        assert_eq!(config.network(), "aether-009-net");
        assert_eq!(config.owner_email, "owner@example.com");
        assert_eq!(config.machine_type, "e2-standard-4");
        assert_eq!(config.service_account_display_name(), "aether-009's account");
        assert!(config.iam_retry().is_none());
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "aether",
            "--instance-name",
            "build-01",
            "--network-name",
            "shared",
            "--iam-retries",
            "2",
        ])
        .unwrap();
        assert_eq!(config.network(), "shared");
        assert_eq!(config.service_account_display_name(), "build-01's account");
        assert_eq!(config.iam_retry().unwrap().max_retries, 2);
    }

    #[test]
    fn test_token_cache_override() {
        let config = Config::try_parse_from(["aether", "--token-cache", "/var/lib/aether/token.json"]).unwrap();
        let store = config.token_store().unwrap();
        assert_eq!(store.path(), std::path::Path::new("/var/lib/aether/token.json"));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
