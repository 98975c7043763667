use crate::app::ports::{HttpClientPort, HttpGetRequest, HttpGetResult};
use crate::error::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

pub struct ReqwestHttp {
    client: reqwest::Client,
}

impl ReqwestHttp {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, request: &HttpGetRequest) -> Result<HttpGetResult> {
        let mut builder = self
            .client
            .get(&request.url)
            .query(&request.query)
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = resp.bytes().await?.to_vec();
        debug!(url = %request.url, status, len = bytes.len(), "GET completed");

        Ok(HttpGetResult { status, bytes, content_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::RepairShoprApi;
    use crate::config::RepairShoprConfig;
    use crate::types::RecordSource;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Accepts one connection, answers with `body` and returns the raw request head
    fn serve_once(listener: TcpListener, body: &'static str) -> thread::JoinHandle<String> {
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&head).to_string()
        })
    }

    #[tokio::test]
    async fn customers_request_carries_query_and_headers() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = serve_once(listener, r#"{"meta":{"page":1,"total_pages":1},"customers":[]}"#);

        let config = RepairShoprConfig {
            token: "tok".to_string(),
            base_url: Some(format!("http://{}", addr)),
            ..Default::default()
        };
        let http = ReqwestHttp::new(Duration::from_secs(5)).unwrap();
        let api = RepairShoprApi::new(Box::new(http), &config);

        let customers = api.fetch_all().await.unwrap();
        assert!(customers.is_empty());

        let head = server.join().unwrap();
        let mut lines = head.lines();
        assert_eq!(
            lines.next().unwrap(),
            "GET /api/v1/customers?sort=lastname+ASC&page=1 HTTP/1.1"
        );
        let headers: Vec<String> = lines.map(|l| l.to_ascii_lowercase()).collect();
        assert!(headers.iter().any(|h| h == "accept: application/json"));
        assert!(headers.iter().any(|h| h == "authorization: bearer tok"));
    }

    #[tokio::test]
    async fn get_reports_status_and_content_type() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = serve_once(listener, "[]");

        let http = ReqwestHttp::new(Duration::from_secs(5)).unwrap();
        let request = HttpGetRequest {
            url: format!("http://{}/ping", addr),
            ..Default::default()
        };
        let result = http.get(&request).await.unwrap();
        let head = server.join().unwrap();

        assert!(result.is_success());
        assert_eq!(result.content_type, "application/json");
        assert_eq!(result.bytes, b"[]");
        assert!(!head.to_ascii_lowercase().contains("authorization:"));
    }
}
