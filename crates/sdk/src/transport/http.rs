//! HTTP transport layer for the Pharo interop SDK.

use super::{HttpMethod, Transport};
use crate::config::ClientConfig;
use crate::error::{PharoResult, TransportFailure};
use crate::response::InteropResponse;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

/// HTTP transport talking to a PharoSmalltalkInteropServer.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: &ClientConfig) -> PharoResult<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .user_agent(concat!("pharo-interop-sdk/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Build a URL for the given path.
    fn build_url(&self, path: &str) -> Result<Url, TransportFailure> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportFailure::connection(&e))
    }

    fn request(&self, method: HttpMethod, url: Url, body: Option<&Value>) -> RequestBuilder {
        match method {
            HttpMethod::Get => {
                let builder = self.client.get(url);
                match body {
                    Some(body) => builder.query(&query_pairs(body)),
                    None => builder,
                }
            }
            HttpMethod::Post => {
                let builder = self.client.post(url);
                match body {
                    Some(body) => builder.json(body),
                    None => builder,
                }
            }
        }
    }

    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<InteropResponse, TransportFailure> {
        let url = self.build_url(path)?;
        debug!(method = %method, url = %url, "Pharo request");

        let response = self
            .request(method, url, body.as_ref())
            .send()
            .await
            .map_err(|e| TransportFailure::connection(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportFailure::connection(&e))?;

        if !status.is_success() {
            return Err(TransportFailure::HttpStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| TransportFailure::InvalidJson(e.to_string()))?;
        Ok(InteropResponse::from_remote_body(body))
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: HttpMethod, path: &str, body: Option<Value>) -> InteropResponse {
        match self.execute(method, path, body).await {
            Ok(response) => response,
            Err(failure) => {
                warn!(
                    method = %method,
                    path = path,
                    kind = failure.kind().as_str(),
                    error = %failure,
                    "Pharo request failed"
                );
                failure.into_response()
            }
        }
    }
}

/// Flatten an argument object into query parameters.
///
/// Strings go through verbatim, `null` is dropped, and every other value is
/// rendered as JSON text (`true`, `42`, ...).
fn query_pairs(body: &Value) -> Vec<(String, String)> {
    match body {
        Value::Object(fields) => fields
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(text) => text.clone(),
                    other => other.to_string(),
                };
                (key.clone(), rendered)
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::RemoteError;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_transport(server: &MockServer) -> HttpTransport {
        let address = server.address();
        let config = ClientConfig {
            host: address.ip().to_string(),
            port: address.port(),
            timeout: Duration::from_secs(30),
        };
        HttpTransport::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_get_request_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get-class-source"))
            .and(query_param("class_name", "Object"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "result": "Object subclass: ..."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport
            .call(
                HttpMethod::Get,
                "/get-class-source",
                Some(json!({"class_name": "Object"})),
            )
            .await;

        assert_eq!(
            response,
            InteropResponse::success(json!("Object subclass: ..."))
        );
    }

    #[tokio::test]
    async fn test_post_request_with_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/eval"))
            .and(body_json(json!({"code": "1 + 1"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": 2})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport
            .call(HttpMethod::Post, "/eval", Some(json!({"code": "1 + 1"})))
            .await;

        assert!(response.is_success());
        assert_eq!(response.result(), Some(&json!(2)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Grab a free port, then release it so nothing is listening there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ClientConfig {
            host: "127.0.0.1".to_string(),
            port,
            timeout: Duration::from_secs(5),
        };
        let transport = HttpTransport::new(&config).unwrap();

        let response = transport.call(HttpMethod::Get, "/list-packages", None).await;

        assert!(!response.is_success());
        match response.error() {
            Some(RemoteError::Message(message)) => {
                assert!(message.contains("connection error"), "got {}", message)
            }
            other => panic!("Expected message error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_string_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get-class-source"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"success": false, "error": "Class NoSuchClass not found"})),
            )
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport
            .call(
                HttpMethod::Get,
                "/get-class-source",
                Some(json!({"class_name": "NoSuchClass"})),
            )
            .await;

        assert_eq!(
            response,
            InteropResponse::failure("Class NoSuchClass not found")
        );
    }

    #[tokio::test]
    async fn test_error_status_with_structured_error() {
        let server = MockServer::start().await;
        let error = json!({
            "description": "ZeroDivide",
            "stack_trace": "SmallInteger>>/\nUndefinedObject>>DoIt",
            "receiver": {
                "class": "SmallInteger",
                "self": "1",
                "variables": {}
            },
            "extra": [1, 2]
        });

        Mock::given(method("POST"))
            .and(path("/eval"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"success": false, "error": error.clone()})),
            )
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport
            .call(HttpMethod::Post, "/eval", Some(json!({"code": "1/0"})))
            .await;

        assert_eq!(response.to_value(), json!({"success": false, "error": error}));
        match response.error() {
            Some(RemoteError::Structured(structured)) => {
                assert_eq!(structured.description(), Some("ZeroDivide"));
                assert_eq!(
                    structured.receiver().unwrap().class.as_deref(),
                    Some("SmallInteger")
                );
            }
            other => panic!("Expected structured error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list-packages"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Server Error"))
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport.call(HttpMethod::Get, "/list-packages", None).await;

        assert_eq!(
            response,
            InteropResponse::failure("HTTP error 500: Server Error")
        );
    }

    #[tokio::test]
    async fn test_invalid_json_on_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/list-packages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport.call(HttpMethod::Get, "/list-packages", None).await;

        match response.error() {
            Some(RemoteError::Message(message)) => {
                assert!(message.starts_with("invalid JSON response"), "got {}", message)
            }
            other => panic!("Expected message error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bare_json_body_becomes_result() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/get-settings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stackSize": 100})))
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport.call(HttpMethod::Get, "/get-settings", None).await;

        assert_eq!(response, InteropResponse::success(json!({"stackSize": 100})));
    }

    #[tokio::test]
    async fn test_server_envelope_passes_through_untouched() {
        let server = MockServer::start().await;
        let body = json!({
            "success": true,
            "result": 1,
            "warnings": ["deprecated"],
            "elapsedMs": 3
        });

        Mock::given(method("POST"))
            .and(path("/eval"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let transport = create_transport(&server);
        let response = transport
            .call(HttpMethod::Post, "/eval", Some(json!({"code": "1"})))
            .await;

        assert_eq!(response.to_value(), body);
        assert_eq!(response.result(), Some(&json!(1)));
    }

    #[test]
    fn test_build_url() {
        let transport = HttpTransport::new(&ClientConfig::default()).unwrap();

        let url = transport.build_url("/eval").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8086/eval");

        let url = transport.build_url("list-packages").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8086/list-packages");
    }

    #[test]
    fn test_query_pairs() {
        let pairs = query_pairs(&json!({
            "target_type": "world",
            "capture_screenshot": true,
            "load_groups": null,
            "count": 3
        }));

        assert_eq!(
            pairs,
            vec![
                ("target_type".to_string(), "world".to_string()),
                ("capture_screenshot".to_string(), "true".to_string()),
                ("count".to_string(), "3".to_string()),
            ]
        );
    }
}
