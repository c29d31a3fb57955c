use crate::client::SearchService;
use crate::model::{SearchCriteria, SearchError, SearchResponse};

use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

pub struct HttpSearchClient {
    client: Client,
    url: String,
}

impl HttpSearchClient {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .user_agent("FlightScout/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::HttpError(e.to_string()))?;

        Ok(Self { client, url: url.to_string() })
    }
}

fn map_transport(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else if e.is_decode() {
        SearchError::InvalidResponse(e.to_string())
    } else {
        SearchError::HttpError(e.to_string())
    }
}

#[async_trait::async_trait]
impl SearchService for HttpSearchClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<SearchResponse, SearchError> {
        info!(
            "🔎 Searching {} → {} on {} for {} passenger(s)",
            criteria.origin, criteria.destination, criteria.date, criteria.passengers
        );

        let response = self
            .client
            .post(&self.url)
            .json(criteria)
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown".into());
            warn!("❌ Search service responded [{}]: {}", status, body);
            return Err(SearchError::InvalidStatus(status.as_u16()));
        }

        response.json::<SearchResponse>().await.map_err(map_transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn criteria() -> SearchCriteria {
        SearchCriteria {
            origin: "JFK".into(),
            destination: "LAX".into(),
            date: chrono::NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            passengers: 1,
        }
    }

    /// Client that talks to the stub directly, whatever proxy the host sets.
    fn local_client(url: &str) -> HttpSearchClient {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpSearchClient { client, url: url.to_string() }
    }

    /// Reads one full HTTP request (headers plus Content-Length body).
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Serves a single canned response and hands back the received request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/search", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });
        (url, handle)
    }

    #[tokio::test]
    async fn posts_criteria_and_decodes_envelope() {
        let (url, server) = serve_once("200 OK", r#"{"data": [], "dictionaries": {"carriers": {"AA": null}}}"#).await;
        let client = local_client(&url);

        let response = client.search(&criteria()).await.unwrap();
        assert_eq!(response.data.map(|d| d.len()), Some(0));

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /search"));
        assert!(request.contains(r#""origin":"JFK""#));
        assert!(request.contains(r#""date":"2025-03-09""#));
    }

    #[tokio::test]
    async fn error_status_is_a_search_failure() {
        let (url, _server) = serve_once("503 Service Unavailable", r#"{"error": "down"}"#).await;
        let client = local_client(&url);

        let err = client.search(&criteria()).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidStatus(503)));
    }

    #[tokio::test]
    async fn undecodable_body_is_a_search_failure() {
        let (url, _server) = serve_once("200 OK", "<html>oops</html>").await;
        let client = local_client(&url);

        let err = client.search(&criteria()).await.unwrap_err();
        assert!(matches!(err, SearchError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn closed_port_is_a_search_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/search", listener.local_addr().unwrap());
        drop(listener);
        let client = local_client(&url);

        let err = client.search(&criteria()).await.unwrap_err();
        assert!(matches!(err, SearchError::HttpError(_) | SearchError::Timeout));
    }
}
