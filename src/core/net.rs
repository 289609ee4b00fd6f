// src/core/net.rs

// Blocking JSON GET over HTTP. The transport is a trait so the pipeline can be
// driven by canned responses in tests.

use std::time::Duration;

use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::debug;

use crate::config::options::SourceConfig;
use crate::error::FetchError;

pub trait Transport {
    /// GET `path` (relative to the source's base URL) and decode the body as JSON.
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError>;
}

pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base: String,
}

impl HttpTransport {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| FetchError::Http { url: config.base_url.clone(), source })?;

        Ok(Self {
            http,
            base: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for HttpTransport {
    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, FetchError> {
        let url = format!("{}{}", self.base, path);
        debug!(%url, ?query, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|source| FetchError::Http { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status: status.as_u16() });
        }

        response
            .json::<Value>()
            .map_err(|e| FetchError::Decode { url, detail: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answer a single request with `status` and `body`, return the base URL.
    fn serve_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let reply = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(reply.as_bytes()).unwrap();
        });
        format!("http://{addr}")
    }

    fn transport(base_url: String) -> HttpTransport {
        let config = SourceConfig { base_url, timeout_secs: 5, ..SourceConfig::default() };
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn base_url_loses_its_trailing_slash() {
        let t = transport("http://127.0.0.1:9/v2/".into());
        assert_eq!(t.base, "http://127.0.0.1:9/v2");
    }

    #[test]
    fn json_body_is_decoded() {
        let t = transport(serve_once("200 OK", r#"{"data":[{"id":"1"}],"next_page":null}"#));
        let v = t.get_json("/events", &[("page", "1".to_string())]).unwrap();
        assert_eq!(v["data"][0]["id"], "1");
    }

    #[test]
    fn non_success_status_is_a_status_error() {
        let t = transport(serve_once("503 Service Unavailable", "{}"));
        let err = t.get_json("/series/1/maps", &[]).unwrap_err();
        assert!(
            matches!(err, FetchError::Status { status: 503, ref url } if url.ends_with("/series/1/maps")),
            "{err}"
        );
    }

    #[test]
    fn undecodable_body_is_a_decode_error() {
        let t = transport(serve_once("200 OK", "<html>rate limited</html>"));
        let err = t.get_json("/events", &[]).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }), "{err}");
    }

    #[test]
    fn refused_connection_is_an_http_error() {
        // bind then drop: nothing listens on the port afterwards
        let port = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
        let t = transport(format!("http://127.0.0.1:{port}"));
        let err = t.get_json("/events", &[("page", "1".to_string())]).unwrap_err();
        assert!(matches!(err, FetchError::Http { ref url, .. } if url.ends_with("/events")), "{err}");
    }
}
