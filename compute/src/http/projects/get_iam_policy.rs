use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::types::GetPolicyOptions;

#[derive(Clone, PartialEq, Eq, serde::Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GetIamPolicyRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GetPolicyOptions>,
}

pub fn build(base_url: &str, client: &Client, project_id: &str, data: &GetIamPolicyRequest) -> RequestBuilder {
    let url = format!("{}/projects/{}:getIamPolicy", base_url, project_id);
    client.post(url).json(data)
}
