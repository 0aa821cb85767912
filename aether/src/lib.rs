//! # aether
//!
//! Stands up one Compute Engine VM together with everything it needs: a dedicated VPC network,
//! SSH and ICMP firewall rules, a service account the VM runs as, and the IAM bindings that let the
//! owner log in and administer it.
//!
//! The steps run strictly in order and the first failure stops the run. Resources created before
//! the failure are left in place.
pub mod config;
pub mod provision;
