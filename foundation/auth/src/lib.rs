//! # aether-auth
//!
//! OAuth2 authentication for installed applications talking to Google Cloud APIs.
//!
//! A `client_secret.json` downloaded from the Cloud console identifies the application. The first
//! run opens the consent screen through a loopback redirect and stores the resulting token;
//! later runs reuse the stored refresh token.
//!
//! ```no_run
//! use aether_auth::credentials::ClientSecretsFile;
//! use aether_auth::token::{Config, DefaultTokenSourceProvider};
//! use token_source::TokenSourceProvider;
//!
//! async fn run() {
//!     let secrets = ClientSecretsFile::new_from_file("./client_secret.json").await.unwrap();
//!     let scopes = ["https://www.googleapis.com/auth/cloud-platform"];
//!     let tsp = DefaultTokenSourceProvider::new(Config::default().with_scopes(&scopes), secrets)
//!         .await
//!         .unwrap();
//!     let bearer = tsp.token_source().token().await.unwrap();
//! }
//! ```
pub mod credentials;
pub mod error;
pub mod flow;
pub mod token;
pub mod token_source;
pub mod token_store;
