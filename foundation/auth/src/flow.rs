use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use crate::credentials::ClientSecret;
use crate::error::Error;
use crate::token::Token;
use crate::token_source::{default_http_client, request_token};

const SUCCESS_PAGE: &str = "<html><body>Authorization complete. You may close this window.</body></html>";
const FAILURE_PAGE: &str = "<html><body>Authorization failed. Check the terminal for details.</body></html>";
const NOT_FOUND: &str = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

/// How long a single browser connection may take to send its request or read the reply.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth2 authorization code flow for installed applications using a loopback redirect.
///
/// See <https://developers.google.com/identity/protocols/oauth2/native-app>.
#[derive(Debug)]
pub struct AuthorizationCodeFlow {
    secret: ClientSecret,
    scopes: String,
    client: reqwest::Client,
}

#[derive(serde::Serialize)]
struct ExchangeBody<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub code: &'a str,
    pub grant_type: &'a str,
    pub redirect_uri: &'a str,
}

impl AuthorizationCodeFlow {
    pub fn new(secret: ClientSecret, scopes: String) -> Self {
        Self {
            secret,
            scopes,
            client: default_http_client(),
        }
    }

    /// Runs the complete flow: prints the consent URL, waits for the browser redirect and
    /// exchanges the received code for a token.
    pub async fn authorize(&self) -> Result<Token, Error> {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
        let redirect_uri = format!("http://127.0.0.1:{}", listener.local_addr()?.port());
        let state = random_state();
        let url = self.consent_url(&redirect_uri, &state)?;

        eprintln!("Open the following URL in your browser to authorize access:\n\n  {url}\n");
        tracing::info!("waiting for authorization redirect on {redirect_uri}");

        let code = receive_code(&listener, &state, CONNECTION_TIMEOUT).await?;
        self.exchange(&code, &redirect_uri).await
    }

    pub fn consent_url(&self, redirect_uri: &str, state: &str) -> Result<Url, Error> {
        let mut url = Url::parse(self.secret.auth_uri())?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.secret.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &self.scopes)
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state);
        Ok(url)
    }

    pub async fn exchange(&self, code: &str, redirect_uri: &str) -> Result<Token, Error> {
        let data = ExchangeBody {
            client_id: &self.secret.client_id,
            client_secret: &self.secret.client_secret,
            code,
            grant_type: "authorization_code",
            redirect_uri,
        };
        let it = request_token(&self.client, self.secret.token_uri(), &data).await?;
        tracing::debug!("authorization code exchanged");
        Ok(it.to_token(time::OffsetDateTime::now_utc()))
    }
}

fn random_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

async fn receive_code(listener: &TcpListener, state: &str, timeout: Duration) -> Result<String, Error> {
    loop {
        let (mut stream, peer) = listener.accept().await?;
        let request_line = match tokio::time::timeout(timeout, read_request_line(&mut stream)).await {
            Ok(Ok(line)) => line,
            Ok(Err(e)) => {
                tracing::debug!("ignoring connection from {peer}: {e}");
                continue;
            }
            Err(_) => {
                tracing::debug!("ignoring idle connection from {peer}");
                continue;
            }
        };

        let result = parse_redirect(&request_line, state);
        let response = match &result {
            // e.g. favicon requests
            Err(Error::InvalidRedirect(_)) => {
                reply(&mut stream, NOT_FOUND, timeout).await;
                continue;
            }
            Ok(_) => page(SUCCESS_PAGE),
            Err(_) => page(FAILURE_PAGE),
        };
        reply(&mut stream, &response, timeout).await;
        return result;
    }
}

async fn read_request_line(stream: &mut TcpStream) -> std::io::Result<String> {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut header = String::new();
    while reader.read_line(&mut header).await? > 0 && !header.trim_end().is_empty() {
        header.clear();
    }
    Ok(request_line)
}

async fn reply(stream: &mut TcpStream, response: &str, timeout: Duration) {
    let write = async {
        stream.write_all(response.as_bytes()).await?;
        stream.flush().await
    };
    match tokio::time::timeout(timeout, write).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::debug!("failed to reply to the browser: {e}"),
        Err(_) => tracing::debug!("timed out replying to the browser"),
    }
}

fn page(body: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    )
}

/// Extracts the authorization code from the request line of the redirect, e.g.
/// `GET /?state=abc&code=4/0Ab HTTP/1.1`.
fn parse_redirect(request_line: &str, expected_state: &str) -> Result<String, Error> {
    let target = request_line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| Error::InvalidRedirect(request_line.trim().to_string()))?;
    let url = Url::parse("http://127.0.0.1")?.join(target)?;

    let mut code = None;
    let mut state = None;
    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(Error::AuthorizationDenied(error));
    }
    match code {
        None => Err(Error::InvalidRedirect(target.to_string())),
        Some(_) if state.as_deref() != Some(expected_state) => Err(Error::StateMismatch),
        Some(code) => Ok(code),
    }
}
