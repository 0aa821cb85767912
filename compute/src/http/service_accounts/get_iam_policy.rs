use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::types::GetPolicyOptions;

pub fn build(base_url: &str, client: &Client, project_id: &str, email: &str, options: &GetPolicyOptions) -> RequestBuilder {
    let url = format!("{}/projects/{}/serviceAccounts/{}:getIamPolicy", base_url, project_id, email);
    let mut builder = client.post(url);
    if let Some(version) = options.requested_policy_version {
        builder = builder.query(&[("options.requestedPolicyVersion", version)]);
    }
    builder.header(reqwest::header::CONTENT_LENGTH, 0)
}
