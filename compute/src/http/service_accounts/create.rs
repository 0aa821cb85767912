use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::service_accounts::ServiceAccount;

#[derive(Clone, PartialEq, Eq, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceAccountRequest {
    /// The account id that is used to generate the service account email address and a stable
    /// unique id. It must be 6-30 characters long and match `[a-z]([-a-z0-9]*[a-z0-9])`.
    pub account_id: String,
    /// The ServiceAccount resource to create. Currently, only `displayName` and `description`
    /// can be set.
    pub service_account: ServiceAccount,
}

pub fn build(base_url: &str, client: &Client, project_id: &str, data: &CreateServiceAccountRequest) -> RequestBuilder {
    let url = format!("{}/projects/{}/serviceAccounts", base_url, project_id);
    client.post(url).json(data)
}
