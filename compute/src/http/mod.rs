pub mod compute_firewall_client;
pub mod compute_instance_client;
pub mod compute_network_client;
pub mod compute_operation_client;
pub mod error;
pub mod firewalls;
pub mod google_api_client;
pub mod iam_service_account_client;
pub mod instances;
pub mod networks;
pub mod operations;
pub mod projects;
pub mod resource_manager_project_client;
pub mod service_accounts;
pub mod types;
