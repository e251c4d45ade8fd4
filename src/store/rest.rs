//! Hosted fact table over its REST interface
//!
//! The table is exposed PostgREST-style under `{base_url}/rest/v1/{table}`:
//! filters are query parameters (`category=eq.history`), ordering is
//! `order=text.desc`, and writes ask for the affected rows back with
//! `Prefer: return=representation`. Every request carries the project key
//! both as `apikey` and as a bearer token.

use super::{FactQuery, FactStore, StoreError};
use crate::facts::{Fact, FactId, NewFact, VotePatch};
use async_trait::async_trait;
use std::time::Duration;

/// Connection settings for the hosted table
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub base_url: String,
    /// Public (anon) project key
    pub api_key: String,
    /// Table name
    pub table: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

pub struct RestFactStore {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl RestFactStore {
    /// Create a store client
    ///
    /// # Errors
    /// Returns `NotConfigured` if the URL or key is empty, or `Transport` if
    /// the HTTP client cannot be built.
    pub fn new(config: &RestConfig) -> Result<Self, StoreError> {
        if config.base_url.trim().is_empty() {
            return Err(StoreError::NotConfigured(
                "store_url is empty (set TIL_STORE_URL or store_url in config)".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(StoreError::NotConfigured(
                "api_key is empty (set TIL_API_KEY or api_key in config)".to_string(),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StoreError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = format!(
            "{}/rest/v1/{}",
            config.base_url.trim_end_matches('/'),
            config.table
        );

        tracing::info!("Initialized REST fact store: {}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    fn insert_request(&self, fact: &NewFact) -> reqwest::RequestBuilder {
        self.authorized(self.client.post(&self.endpoint))
            .header("Prefer", "return=representation")
            .json(&[fact])
    }

    fn update_request(&self, id: FactId, patch: &VotePatch) -> reqwest::RequestBuilder {
        self.authorized(self.client.patch(&self.endpoint))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch.to_json())
    }

    fn select_request(&self, query: &FactQuery) -> reqwest::RequestBuilder {
        let mut params: Vec<(&str, String)> = vec![("select", "*".to_string())];
        if let Some(category) = query.selection.category() {
            params.push(("category", format!("eq.{}", category.name())));
        }
        params.push(("order", "text.desc".to_string()));
        params.push(("limit", query.limit.to_string()));

        self.authorized(self.client.get(&self.endpoint)).query(&params)
    }

    fn fetch_request(&self, id: FactId) -> reqwest::RequestBuilder {
        self.authorized(self.client.get(&self.endpoint))
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))])
    }

    /// Send a request and decode the row array it returns
    async fn rows(&self, req: reqwest::RequestBuilder) -> Result<Vec<Fact>, StoreError> {
        let response = req.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::debug!("Store error response ({}): {}", status, body);
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Vec<Fact>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Transport(format!("request timed out: {}", e))
    } else {
        StoreError::Transport(e.to_string())
    }
}

/// First row of a write response; writes return exactly the affected rows
fn first_row(rows: Vec<Fact>, what: &str) -> Result<Fact, StoreError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| StoreError::Decode(format!("{} returned no rows", what)))
}

#[async_trait]
impl FactStore for RestFactStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn insert(&self, fact: NewFact) -> Result<Fact, StoreError> {
        tracing::debug!("Inserting fact in category {}", fact.category);
        let rows = self.rows(self.insert_request(&fact)).await?;
        first_row(rows, "insert")
    }

    async fn update(&self, id: FactId, patch: VotePatch) -> Result<Fact, StoreError> {
        tracing::debug!("Setting {} = {} on fact {}", patch.kind.column(), patch.value, id);
        let rows = self.rows(self.update_request(id, &patch)).await?;
        rows.into_iter().next().ok_or(StoreError::NotFound(id))
    }

    async fn select(&self, query: FactQuery) -> Result<Vec<Fact>, StoreError> {
        tracing::debug!(
            "Selecting facts (category: {}, limit: {})",
            query.selection,
            query.limit
        );
        self.rows(self.select_request(&query)).await
    }

    async fn fetch(&self, id: FactId) -> Result<Option<Fact>, StoreError> {
        let rows = self.rows(self.fetch_request(id)).await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{Category, CategorySelection, VoteKind};
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    fn store() -> RestFactStore {
        store_at("https://project.example.co/")
    }

    fn store_at(base_url: &str) -> RestFactStore {
        RestFactStore::new(&RestConfig {
            base_url: base_url.to_string(),
            api_key: "anon-key".to_string(),
            table: "facts".to_string(),
            timeout: Some(Duration::from_secs(5)),
        })
        .unwrap()
    }

    /// Answer one request on a local port with a canned reply.
    /// Returns the base URL and a handle yielding the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let reply = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{}", addr), handle)
    }

    /// Read a request head plus its content-length body
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
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn query_map(req: &reqwest::Request) -> HashMap<String, String> {
        req.url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn rejects_missing_credentials() {
        let err = RestFactStore::new(&RestConfig {
            base_url: "https://project.example.co".to_string(),
            api_key: String::new(),
            table: "facts".to_string(),
            timeout: None,
        });
        assert!(matches!(err, Err(StoreError::NotConfigured(_))));
    }

    #[test]
    fn select_all_has_no_category_filter() {
        let req = store()
            .select_request(&FactQuery::new(CategorySelection::All, 100))
            .build()
            .unwrap();
        assert_eq!(req.method(), reqwest::Method::GET);
        assert_eq!(req.url().path(), "/rest/v1/facts");

        let q = query_map(&req);
        assert_eq!(q.get("select").map(String::as_str), Some("*"));
        assert_eq!(q.get("order").map(String::as_str), Some("text.desc"));
        assert_eq!(q.get("limit").map(String::as_str), Some("100"));
        assert!(!q.contains_key("category"));
    }

    #[test]
    fn select_category_filters_by_name() {
        let req = store()
            .select_request(&FactQuery::new(
                CategorySelection::Category(Category::History),
                100,
            ))
            .build()
            .unwrap();
        let q = query_map(&req);
        assert_eq!(q.get("category").map(String::as_str), Some("eq.history"));
    }

    #[test]
    fn requests_carry_key_headers() {
        let req = store()
            .select_request(&FactQuery::new(CategorySelection::All, 1))
            .build()
            .unwrap();
        assert_eq!(req.headers()["apikey"], "anon-key");
        assert_eq!(req.headers()["authorization"], "Bearer anon-key");
    }

    #[test]
    fn update_targets_row_and_sends_one_column() {
        let patch = VotePatch {
            kind: VoteKind::Interesting,
            value: 4,
        };
        let req = store().update_request(FactId(12), &patch).build().unwrap();
        assert_eq!(req.method(), reqwest::Method::PATCH);
        assert_eq!(
            query_map(&req).get("id").map(String::as_str),
            Some("eq.12")
        );
        assert_eq!(req.headers()["prefer"], "return=representation");

        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json, serde_json::json!({"votesInteresting": 4}));
    }

    #[test]
    fn insert_posts_single_row_array() {
        let fact = NewFact {
            text: "Bees can recognize human faces.".to_string(),
            source: "https://example.com".to_string(),
            category: Category::Science,
        };
        let req = store().insert_request(&fact).build().unwrap();
        assert_eq!(req.method(), reqwest::Method::POST);

        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json[0]["category"], "science");
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn select_decodes_row_array() {
        let (url, server) = serve_once(
            "200 OK",
            r#"[{"id":1,"text":"Venus spins backwards.","source":"https://example.com/venus","category":"science","votesInteresting":3,"votesMindblowing":1,"votesFalse":0},
                {"id":2,"text":"Bananas are berries.","source":"https://example.com/banana","category":"science","votesInteresting":0,"votesMindblowing":0,"votesFalse":0}]"#,
        )
        .await;

        let facts = store_at(&url)
            .select(FactQuery::new(
                CategorySelection::Category(Category::Science),
                100,
            ))
            .await
            .unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].id, FactId(1));
        assert_eq!(facts[0].votes_interesting, 3);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /rest/v1/facts?"), "{}", request);
        assert!(request.contains("category=eq.science"), "{}", request);
    }

    #[tokio::test]
    async fn error_status_keeps_code_and_body() {
        let (url, _server) =
            serve_once("500 Internal Server Error", r#"{"message":"boom"}"#).await;

        let err = store_at(&url)
            .select(FactQuery::new(CategorySelection::All, 100))
            .await
            .unwrap_err();
        match err {
            StoreError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("boom"), "{}", body);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let (url, _server) = serve_once("200 OK", r#"{"oops":1}"#).await;

        let err = store_at(&url)
            .select(FactQuery::new(CategorySelection::All, 100))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)), "{:?}", err);
    }

    #[tokio::test]
    async fn patch_matching_no_rows_is_not_found() {
        let (url, server) = serve_once("200 OK", "[]").await;
        let patch = VotePatch {
            kind: VoteKind::False,
            value: 1,
        };

        let err = store_at(&url)
            .update(FactId(99), patch)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(FactId(99))), "{:?}", err);

        let request = server.await.unwrap();
        assert!(
            request.starts_with("PATCH /rest/v1/facts?id=eq.99"),
            "{}",
            request
        );
        assert!(request.ends_with(r#"{"votesFalse":1}"#), "{}", request);
    }

    #[tokio::test]
    async fn insert_without_returned_row_is_a_decode_error() {
        let (url, _server) = serve_once("201 Created", "[]").await;
        let fact = NewFact {
            text: "Bees can recognize human faces.".to_string(),
            source: "https://example.com".to_string(),
            category: Category::Science,
        };

        let err = store_at(&url).insert(fact).await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)), "{:?}", err);
    }
}
