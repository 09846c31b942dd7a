//! Catalog client implementation

use std::time::Duration;

use async_trait::async_trait;
use rickdex_core::{Character, CharacterPage, ErrorBody};
use tracing::debug;
use url::Url;

use crate::error::{CatalogError, Result};

/// Search endpoint of the public catalog
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api/character/";

/// A source of characters searchable by name
///
/// The search coordinator only ever talks to this trait, so tests can swap in
/// a scripted implementation.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch the first page of characters whose name matches `name`
    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Character>>;
}

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Search endpoint; the `name` query parameter is appended to it
    pub base_url: Url,

    /// Transport timeout for a whole request
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.parse().expect("default base URL is valid"),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Catalog client that talks to the REST endpoint over HTTP
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    /// Build a client from configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Get the search endpoint URL
    pub fn url(&self) -> &Url {
        &self.base_url
    }

    /// Build the request URL for a name search
    pub fn search_url(&self, name: &str) -> Result<Url> {
        if name.is_empty() || !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(CatalogError::InvalidInput);
        }

        let mut url = self.base_url.clone();
        url.query_pairs_mut().clear().append_pair("name", name);
        Ok(url)
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_by_name(&self, name: &str) -> Result<Vec<Character>> {
        let url = self.search_url(name)?;
        debug!("Fetching characters from {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        interpret_response(status, &body)
    }
}

/// Classify a search response by status code and payload
pub fn interpret_response(status: u16, body: &[u8]) -> Result<Vec<Character>> {
    if status == 404 {
        return Err(CatalogError::NotFound);
    }

    if !(200..=299).contains(&status) {
        return Err(CatalogError::BadResponse { status });
    }

    match CharacterPage::from_json(body) {
        Ok(page) => Ok(page.results),
        // The catalog sometimes answers "nothing here" with a success status
        Err(_) if ErrorBody::from_json(body).is_ok() => Err(CatalogError::NotFound),
        Err(e) => Err(CatalogError::DecodeFailure(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"{
        "info": {"count": 1, "pages": 1, "next": null, "prev": null},
        "results": [{
            "id": 1,
            "name": "Rick Sanchez",
            "status": "Alive",
            "species": "Human",
            "type": "",
            "gender": "Male",
            "origin": {"name": "Earth (C-137)", "url": ""},
            "location": {"name": "Citadel of Ricks", "url": ""},
            "image": "https://rickandmortyapi.com/api/character/avatar/1.jpeg",
            "episode": [],
            "url": "https://rickandmortyapi.com/api/character/1",
            "created": "2017-11-04T18:48:46.250Z"
        }]
    }"#;

    fn client() -> HttpCatalogClient {
        HttpCatalogClient::new(ClientConfig::default()).unwrap()
    }

    #[test]
    fn test_search_url_encodes_name() {
        let url = client().search_url("rick sanchez & co").unwrap();

        assert_eq!(url.host_str(), Some("rickandmortyapi.com"));
        assert_eq!(url.path(), "/api/character/");

        let pairs: Vec<_> = url.query_pairs().collect();
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].0, "name");
        assert_eq!(pairs[0].1, "rick sanchez & co");
    }

    #[test]
    fn test_search_url_rejects_empty_name() {
        assert_eq!(client().search_url(""), Err(CatalogError::InvalidInput));
    }

    #[test]
    fn test_search_url_rejects_non_http_base() {
        let config = ClientConfig {
            base_url: "file:///tmp/characters".parse().unwrap(),
            ..ClientConfig::default()
        };
        let client = HttpCatalogClient::new(config).unwrap();
        assert_eq!(client.search_url("rick"), Err(CatalogError::InvalidInput));
    }

    #[tokio::test]
    async fn test_fetch_with_empty_name_never_hits_network() {
        let result = client().fetch_by_name("").await;
        assert_eq!(result, Err(CatalogError::InvalidInput));
    }

    #[test]
    fn test_interpret_success() {
        let characters = interpret_response(200, PAGE.as_bytes()).unwrap();
        assert_eq!(characters.len(), 1);
        assert_eq!(characters[0].name, "Rick Sanchez");
    }

    #[test]
    fn test_interpret_not_found_status() {
        let body = br#"{"error":"There is nothing here"}"#;
        assert_eq!(interpret_response(404, body), Err(CatalogError::NotFound));
    }

    #[test]
    fn test_interpret_error_body_with_success_status() {
        let body = br#"{"error":"There is nothing here"}"#;
        assert_eq!(interpret_response(200, body), Err(CatalogError::NotFound));
    }

    #[test]
    fn test_interpret_bad_status() {
        assert_eq!(
            interpret_response(500, b"oops"),
            Err(CatalogError::BadResponse { status: 500 })
        );
        assert_eq!(
            interpret_response(301, PAGE.as_bytes()),
            Err(CatalogError::BadResponse { status: 301 })
        );
    }

    #[test]
    fn test_interpret_decode_failure() {
        let err = interpret_response(200, br#"{"results": 3}"#).unwrap_err();
        assert!(matches!(err, CatalogError::DecodeFailure(_)));
        assert!(err.to_string().starts_with("Failed to parse response: "));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CatalogError::InvalidInput.to_string(), "Invalid search URL");
        assert_eq!(CatalogError::NotFound.to_string(), "No characters found");
        assert_eq!(
            CatalogError::BadResponse { status: 502 }.to_string(),
            "Invalid response from server"
        );
        assert_eq!(
            CatalogError::NetworkFailure("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }
}
