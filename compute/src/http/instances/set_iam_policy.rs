use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::types::Policy;

#[derive(Clone, PartialEq, Eq, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetIamPolicyRequest {
    /// The complete policy to be applied to the instance.
    pub policy: Policy,
}

pub fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    zone: &str,
    resource: &str,
    data: &SetIamPolicyRequest,
) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/zones/{}/instances/{}/setIamPolicy",
        base_url, project_id, zone, resource
    );
    client.post(url).json(data)
}
