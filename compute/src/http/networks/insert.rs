use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::networks::Network;

pub fn build(base_url: &str, client: &Client, project_id: &str, data: &Network) -> RequestBuilder {
    let url = format!("{}/projects/{}/global/networks", base_url, project_id);
    client.post(url).json(data)
}
