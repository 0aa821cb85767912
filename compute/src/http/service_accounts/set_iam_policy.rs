use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::types::Policy;

#[derive(Clone, PartialEq, Eq, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetIamPolicyRequest {
    pub policy: Policy,
}

pub fn build(base_url: &str, client: &Client, project_id: &str, email: &str, data: &SetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{}/projects/{}/serviceAccounts/{}:setIamPolicy", base_url, project_id, email);
    client.post(url).json(data)
}
