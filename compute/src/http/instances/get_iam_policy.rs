use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::types::GetPolicyOptions;

#[derive(Clone, PartialEq, Eq, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options_requested_policy_version: Option<i32>,
}

impl From<&GetPolicyOptions> for GetIamPolicyRequest {
    fn from(options: &GetPolicyOptions) -> Self {
        Self {
            options_requested_policy_version: options.requested_policy_version,
        }
    }
}

pub fn build(
    base_url: &str,
    client: &Client,
    project_id: &str,
    zone: &str,
    resource: &str,
    data: &GetIamPolicyRequest,
) -> RequestBuilder {
    let url = format!(
        "{}/projects/{}/zones/{}/instances/{}/getIamPolicy",
        base_url, project_id, zone, resource
    );
    client.get(url).query(data)
}
