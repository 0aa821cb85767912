use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::types::Policy;

#[derive(Clone, PartialEq, Eq, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SetIamPolicyRequest {
    /// The complete policy to be applied to the project.
    pub policy: Policy,
    /// A FieldMask specifying which fields of the policy to modify. Only the fields in the mask
    /// will be modified. If no mask is provided, `bindings, etag` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<String>,
}

pub fn build(base_url: &str, client: &Client, project_id: &str, data: &SetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{}/projects/{}:setIamPolicy", base_url, project_id);
    client.post(url).json(data)
}
