use reqwest_middleware::{ClientWithMiddleware as Client, RequestBuilder};

/// Waits for the specified operation until it is `DONE` or the server side wait deadline
/// (about two minutes) is reached.
pub fn build(base_url: &str, client: &Client, project_id: &str, zone: Option<&str>, operation: &str) -> RequestBuilder {
    let url = match zone {
        Some(zone) => format!("{}/projects/{}/zones/{}/operations/{}/wait", base_url, project_id, zone, operation),
        None => format!("{}/projects/{}/global/operations/{}/wait", base_url, project_id, operation),
    };
    client.post(url).header(reqwest::header::CONTENT_LENGTH, 0)
}
