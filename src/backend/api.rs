//! HTTP client for the search and history services

use std::sync::Arc;

use reqwest::{Client, StatusCode};

use super::types::{ErrorResponse, HistoryEntry, PlaceResult, SearchRequest, SearchResponse};
use crate::config::Config;
use crate::error::ApiError;

/// Client for the cafe search service and the history service
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    config: Arc<Config>,
}

impl BackendClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    /// Look up a single place for the user's raw keyword
    pub async fn search(&self, keyword: &str) -> Result<PlaceResult, ApiError> {
        let request = SearchRequest {
            keyword: self.config.prefixed_keyword(keyword),
            user_id: self.config.user_id.clone(),
        };
        tracing::info!("Searching for {:?}", request.keyword);

        let response = self
            .client
            .post(&self.config.search_url)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        decode_search(status, &body)
    }

    /// Fetch every place previously found for the configured user
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        tracing::info!("Fetching history for user {}", self.config.user_id);

        let response = self
            .client
            .get(&self.config.history_url)
            .query(&[("UserID", self.config.user_id.as_str())])
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;

        decode_history(status, &body)
    }

    /// Download the raw bytes of a photo
    pub async fn photo(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Server { status: status.as_u16(), message: None });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// Turn a search response into a place, or into the matching error.
pub fn decode_search(status: StatusCode, body: &[u8]) -> Result<PlaceResult, ApiError> {
    if !status.is_success() {
        return Err(server_error(status, body));
    }

    let response: SearchResponse =
        serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))?;

    let result = response.found().ok_or(ApiError::NotFound)?;

    serde_json::from_value(result).map_err(|e| ApiError::Malformed(e.to_string()))
}

pub fn decode_history(status: StatusCode, body: &[u8]) -> Result<Vec<HistoryEntry>, ApiError> {
    if !status.is_success() {
        return Err(server_error(status, body));
    }

    serde_json::from_slice(body).map_err(|e| ApiError::Malformed(e.to_string()))
}

fn server_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.message());

    ApiError::Server { status: status.as_u16(), message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const PLACE: &str = r#"{"result": {
        "name": "Blue Bottle",
        "rating": 4.5,
        "photo_urls": ["https://img/1", "https://img/2"],
        "reviews": [{"author_name": "Aki", "rating": 5, "text": "Great"}]
    }}"#;

    #[test]
    fn test_decode_search_place() {
        let place = decode_search(StatusCode::OK, PLACE.as_bytes()).unwrap();
        assert_eq!(place.name, "Blue Bottle");
        assert_eq!(place.photo_urls.len(), 2);
        assert_eq!(place.reviews[0].rating, 5.0);
    }

    #[test]
    fn test_decode_search_without_result_is_not_found() {
        assert_eq!(decode_search(StatusCode::OK, b"{}"), Err(ApiError::NotFound));
        assert_eq!(decode_search(StatusCode::OK, br#"{"result": null}"#), Err(ApiError::NotFound));
    }

    #[test]
    fn test_decode_search_falsy_result_is_not_found() {
        for body in [
            r#"{"result": ""}"#,
            r#"{"result": false}"#,
            r#"{"result": 0}"#,
            r#"{"result": 0.0}"#,
            r#"{"result": []}"#,
        ] {
            assert_eq!(decode_search(StatusCode::OK, body.as_bytes()), Err(ApiError::NotFound), "{body}");
        }

        let err = decode_search(StatusCode::OK, br#"{"result": "Blue Bottle"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_decode_search_without_rating() {
        let place = decode_search(StatusCode::OK, br#"{"result": {"name": "Blue Bottle"}}"#).unwrap();
        assert_eq!(place.rating, None);
        assert!(place.reviews.is_empty());
    }

    #[test]
    fn test_decode_search_bad_shape_is_malformed() {
        let err = decode_search(StatusCode::OK, br#"{"result": {"rating": "high"}}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));

        let err = decode_search(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_decode_server_error_message() {
        let err = decode_search(StatusCode::INTERNAL_SERVER_ERROR, br#"{"error": "quota exceeded"}"#).unwrap_err();
        assert_eq!(err, ApiError::Server { status: 500, message: Some("quota exceeded".into()) });

        let err = decode_search(StatusCode::BAD_GATEWAY, b"Bad Gateway").unwrap_err();
        assert_eq!(err, ApiError::Server { status: 502, message: None });

        let err = decode_search(StatusCode::BAD_REQUEST, br#"{"error": {"code": 7}}"#).unwrap_err();
        assert_eq!(err, ApiError::Server { status: 400, message: Some(r#"{"code":7}"#.into()) });
    }

    #[test]
    fn test_decode_history_defaults_missing_lists() {
        let body = br#"[{"name": "Cafe A", "rating": 4, "place_id": "p1"}]"#;
        let entries = decode_history(StatusCode::OK, body).unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].photo_urls.is_empty());
        assert!(entries[0].reviews.is_empty());

        assert!(decode_history(StatusCode::OK, b"[]").unwrap().is_empty());
        assert!(matches!(decode_history(StatusCode::OK, br#"{"items": []}"#), Err(ApiError::Malformed(_))));
    }

    #[test]
    fn test_decode_history_unrated_entry_among_rated() {
        let body = br#"[
            {"name": "A", "rating": 4.1, "place_id": "p1"},
            {"name": "B", "place_id": "p2"},
            {"name": "C", "rating": 3, "place_id": "p3"}
        ]"#;
        let entries = decode_history(StatusCode::OK, body).unwrap();
        let ratings: Vec<_> = entries.iter().map(|e| e.rating).collect();
        assert_eq!(ratings, vec![Some(4.1), None, Some(3.0)]);
    }

    async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}/dev/test"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map(|v| v.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn client_for(search_url: &str, history_url: &str) -> BackendClient {
        let config = Config {
            search_url: search_url.to_string(),
            history_url: history_url.to_string(),
            ..Config::default()
        };
        let client = Client::builder().no_proxy().build().unwrap();
        BackendClient::with_client(client, Arc::new(config))
    }

    #[tokio::test]
    async fn test_search_sends_prefixed_keyword() {
        let (url, server) = serve_once(200, PLACE).await;
        let backend = client_for(&url, "http://unused");

        let place = backend.search("渋谷").await.unwrap();
        assert_eq!(place.name, "Blue Bottle");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /dev/test "));
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["keyword"], "カフェ 渋谷");
        assert_eq!(body["user_id"], "1");
    }

    #[tokio::test]
    async fn test_search_empty_keyword_is_sent() {
        let (url, server) = serve_once(200, "{}").await;
        let backend = client_for(&url, "http://unused");

        assert_eq!(backend.search("").await, Err(ApiError::NotFound));

        let request = server.await.unwrap();
        let (_, body) = request.split_once("\r\n\r\n").unwrap();
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["keyword"], "カフェ ");
    }

    #[tokio::test]
    async fn test_history_sends_user_id_query() {
        let (url, server) = serve_once(200, "[]").await;
        let backend = client_for("http://unused", &url);

        assert!(backend.history().await.unwrap().is_empty());

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /dev/test?UserID=1 "), "{request}");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = client_for(&format!("http://{addr}/"), "http://unused");
        assert!(matches!(backend.search("x").await, Err(ApiError::Transport(_))));
    }
}
