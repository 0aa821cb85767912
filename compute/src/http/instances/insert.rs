use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::instances::Instance;

pub fn build(base_url: &str, client: &Client, project_id: &str, zone: &str, data: &Instance) -> RequestBuilder {
    let url = format!("{}/projects/{}/zones/{}/instances", base_url, project_id, zone);
    client.post(url).json(data)
}
