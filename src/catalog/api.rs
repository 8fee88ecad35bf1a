//! HTTP seam to the SDS catalog API

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{CatalogError, DetailsRequest, FileRequest};
use crate::config::Config;

/// Catalog API endpoint paths
pub struct CatalogEndpoints;

impl CatalogEndpoints {
    pub const DETAILS: &'static str = "/api/get_details";
    pub const FILE: &'static str = "/api/get_file";
}

/// Operations the pipeline needs from the catalog service
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Request the record listing; returns the raw response body
    async fn get_details(&self, request: &DetailsRequest) -> Result<Vec<u8>, CatalogError>;

    /// Request a single document; returns the raw PDF bytes
    async fn get_file(&self, request: &FileRequest) -> Result<Vec<u8>, CatalogError>;
}

/// `CatalogApi` backed by reqwest
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(config: &Config) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .user_agent(&config.http.user_agent)
            .timeout(config.http_timeout())
            .build()
            .map_err(CatalogError::Client)?;

        Ok(Self {
            client,
            base_url: config.endpoint_base.trim_end_matches('/').to_string(),
        })
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a JSON document with a `text/plain` content type, as the portal expects
    async fn post_text<T: Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Vec<u8>, CatalogError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let payload = serde_json::to_vec(body).map_err(CatalogError::Encode)?;

        debug!("POST {} ({} byte body)", url, payload.len());

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(payload)
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CatalogError::Server {
                status_code: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(CatalogError::BodyRead)?;
        debug!("Received {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn get_details(&self, request: &DetailsRequest) -> Result<Vec<u8>, CatalogError> {
        self.post_text(CatalogEndpoints::DETAILS, request).await
    }

    async fn get_file(&self, request: &FileRequest) -> Result<Vec<u8>, CatalogError> {
        self.post_text(CatalogEndpoints::FILE, request).await
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::{fetch_and_save_document, DownloadError};
    use crate::models::Record;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Request head (lowercased) and raw body seen by the local server
    struct CapturedRequest {
        head: String,
        body: Vec<u8>,
    }

    /// Accept a single connection, capture the request and answer with `status` and `body`
    async fn serve_once(
        status: &'static str,
        body: Vec<u8>,
    ) -> (Config, tokio::task::JoinHandle<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];

            let (head_end, content_length) = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before request was complete");
                buf.extend_from_slice(&chunk[..n]);

                if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .map(|v| v.trim().parse::<usize>().unwrap())
                        .unwrap_or(0);
                    break (end, length);
                }
            };

            while buf.len() < head_end + 4 + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before body was complete");
                buf.extend_from_slice(&chunk[..n]);
            }

            let response_head = format!(
                "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            socket.write_all(response_head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.unwrap();

            CapturedRequest {
                head: String::from_utf8_lossy(&buf[..head_end]).to_lowercase(),
                body: buf[head_end + 4..head_end + 4 + content_length].to_vec(),
            }
        });

        let mut config = Config::default();
        config.endpoint_base = format!("http://{}", addr);
        config.http.timeout_seconds = 10;
        (config, handle)
    }

    #[tokio::test]
    async fn test_get_details_wire_format() {
        let listing = br#"{"data":[{"subid":"S1","recn":7,"langu":"EN","sbgvid":"G1"}]}"#.to_vec();
        let (config, server) = serve_once("200 OK", listing.clone()).await;
        let api = HttpCatalogApi::new(&config).unwrap();

        let body = api.get_details(&DetailsRequest::for_filter("*")).await.unwrap();
        assert_eq!(body, listing);

        let request = server.await.unwrap();
        assert!(request.head.starts_with("post /api/get_details http/1.1"), "{}", request.head);
        assert!(request.head.contains("content-type: text/plain"), "{}", request.head);
        assert_eq!(
            request.body,
            br#"{"client":"app","country":"USA","spec":"","desc":"*","lang":"English"}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn test_get_file_passes_binary_body_through() {
        let pdf: Vec<u8> = (0..=255u8).cycle().take(600).collect();
        let (config, server) = serve_once("200 OK", pdf.clone()).await;
        let api = HttpCatalogApi::new(&config).unwrap();
        let record = Record {
            sub_id: "S1".to_string(),
            recn: 7,
            language: "EN".to_string(),
            group_id: "G1".to_string(),
        };

        let body = api.get_file(&FileRequest::for_record(&record)).await.unwrap();
        assert_eq!(body, pdf);

        let request = server.await.unwrap();
        assert!(request.head.starts_with("post /api/get_file http/1.1"), "{}", request.head);
        assert!(request.head.contains("content-type: text/plain"), "{}", request.head);
        assert_eq!(
            request.body,
            br#"{"client":"app","spec":"S1","recn":7,"langu":"EN","sbgvid":"G1","content":"attachment"}"#.to_vec()
        );
    }

    #[tokio::test]
    async fn test_not_found_is_server_error_and_writes_nothing() {
        let (config, server) = serve_once("404 Not Found", b"no such document".to_vec()).await;
        let api = HttpCatalogApi::new(&config).unwrap();
        let temp_dir = TempDir::new().unwrap();
        let record = Record {
            sub_id: "S404".to_string(),
            recn: 1,
            language: "EN".to_string(),
            group_id: "G1".to_string(),
        };

        let err = fetch_and_save_document(&api, &record, temp_dir.path(), &record.file_name())
            .await
            .unwrap_err();

        match err {
            DownloadError::Api(CatalogError::Server { status_code, message }) => {
                assert_eq!(status_code, 404);
                assert_eq!(message, "no such document");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(!temp_dir.path().join("S404.pdf").exists());

        let request = server.await.unwrap();
        assert!(request.head.starts_with("post /api/get_file http/1.1"));
    }

    #[test]
    fn test_http_api_trims_trailing_slash() {
        let mut config = Config::default();
        config.endpoint_base = "http://localhost:9000/".to_string();
        let api = HttpCatalogApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_http_api_reports_transport_failure() {
        let mut config = Config::default();
        // Nothing listens on port 1
        config.endpoint_base = "http://127.0.0.1:1".to_string();
        config.http.timeout_seconds = 5;
        let api = HttpCatalogApi::new(&config).unwrap();

        let err = api
            .get_details(&DetailsRequest::for_filter("*"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Transport(_)));
    }
}
