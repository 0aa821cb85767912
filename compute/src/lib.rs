#![allow(clippy::result_large_err)]
//! # aether-compute
//!
//! REST clients for the handful of Compute Engine, IAM and Resource Manager calls needed to stand up
//! a single VM, plus the create-and-wait and IAM read-modify-write operations built on top of them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aether_compute::client::{Client, ClientConfig, SCOPES};
//! use aether_compute::iam::Member;
//! use aether_compute::resources::InstanceSpec;
//!
//! async fn run() -> Result<(), aether_compute::error::Error> {
//!     let config = ClientConfig::default()
//!         .with_project("example", "europe-west6-a")
//!         .with_auth("client_secret.json", &SCOPES)
//!         .await?;
//!     let client = Client::new(config);
//!
//!     client.create_network("aether-009-net").await?;
//!     client.create_firewall_rule_allow_tcp_ingress("aether-009-net", "ssh", 22).await?;
//!     let account = client.create_service_account("aether-009", "aether-009's account").await?;
//!     let email = account.email.unwrap_or_default();
//!     client
//!         .create_instance(&InstanceSpec {
//!             name: "aether-009".to_string(),
//!             source_image: "projects/rocky-linux-cloud/global/images/family/rocky-linux-8".to_string(),
//!             machine_type: "e2-standard-4".to_string(),
//!             network: "aether-009-net".to_string(),
//!             service_account_email: email,
//!         })
//!         .await?;
//!     client
//!         .add_instance_iam_binding("aether-009", "roles/compute.osAdminLogin", &Member::user("owner@example.com"))
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! Every create call blocks until the long-running operation it started is `DONE`. IAM bindings are
//! appended to the policy that was just read and written back with its etag; nothing is merged.
pub mod client;
pub mod error;
pub mod http;
pub mod iam;
pub mod resources;
