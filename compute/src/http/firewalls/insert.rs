use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

use crate::http::firewalls::Firewall;

pub fn build(base_url: &str, client: &Client, project_id: &str, data: &Firewall) -> RequestBuilder {
    let url = format!("{}/projects/{}/global/firewalls", base_url, project_id);
    client.post(url).json(data)
}
