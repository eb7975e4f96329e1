//! USDA FoodData Central HTTP client
//!
//! Blocking client for the two endpoints the analyzer needs: food search and
//! food details. Every request carries the API key and is bounded by a fixed
//! timeout. Responses are never cached and failed requests are not retried.
//!
//! API reference: <https://fdc.nal.usda.gov/api-guide.html>

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, ConfigError, DEFAULT_BASE_URL};

/// Per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Transport-level failure of a single request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // The URL carries the API key in its query string
        let e = e.without_url();
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    foods: Option<Vec<FoodSearchHit>>,
}

/// One candidate from a food search
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchHit {
    pub fdc_id: u64,
    #[serde(default)]
    pub description: String,
}

/// Full record for one food
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodDetails {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub food_nutrients: Option<Vec<FoodNutrientEntry>>,
}

impl FoodDetails {
    pub fn nutrients(&self) -> &[FoodNutrientEntry] {
        self.food_nutrients.as_deref().unwrap_or_default()
    }
}

/// `{ nutrient: { id }, amount }` entry of a food record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FoodNutrientEntry {
    #[serde(default)]
    pub nutrient: Option<NutrientRef>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl FoodNutrientEntry {
    pub fn new(nutrient_id: u32, amount: f64) -> Self {
        Self {
            nutrient: Some(NutrientRef { id: Some(nutrient_id) }),
            amount: Some(amount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NutrientRef {
    #[serde(default)]
    pub id: Option<u32>,
}

// ============================================================================
// Data Source
// ============================================================================

/// The two remote operations a food lookup is built from
pub trait FoodDataSource {
    /// Search foods by name, returning at most `page_size` candidates
    fn search_foods(&self, query: &str, page_size: u32) -> Result<Vec<FoodSearchHit>, FetchError>;

    /// Fetch the full nutrient breakdown of one food
    fn get_food(&self, fdc_id: u64) -> Result<FoodDetails, FetchError>;
}

/// FDC client configuration
#[derive(Debug, Clone)]
pub struct FdcClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl FdcClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Client settings from the runtime config; fails without an API key
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config.require_api_key()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            ..Self::new(api_key)
        })
    }
}

/// Blocking FoodData Central client
pub struct FdcClient {
    config: FdcClientConfig,
    http: reqwest::blocking::Client,
}

impl FdcClient {
    pub fn new(config: FdcClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.config.base_url, path);
        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("api_key", self.config.api_key.as_str())])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.json::<T>()?)
    }
}

impl FoodDataSource for FdcClient {
    fn search_foods(&self, query: &str, page_size: u32) -> Result<Vec<FoodSearchHit>, FetchError> {
        let page_size = page_size.to_string();
        let response: SearchResponse =
            self.get_json("foods/search", &[("query", query), ("pageSize", &page_size)])?;
        Ok(response.foods.unwrap_or_default())
    }

    fn get_food(&self, fdc_id: u64) -> Result<FoodDetails, FetchError> {
        self.get_json(&format!("food/{}", fdc_id), &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};

    fn http_response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    fn read_request_line(stream: &mut std::net::TcpStream) -> String {
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        String::from_utf8_lossy(&request)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Serve one canned response per connection, returning the request lines seen
    fn serve(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/fdc/v1", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let mut seen = Vec::new();
            for response in responses {
                let (mut stream, _) = listener.accept().unwrap();
                seen.push(read_request_line(&mut stream));
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            }
            seen
        });
        (base_url, handle)
    }

    fn client(base_url: &str, timeout: Duration) -> FdcClient {
        FdcClient::new(FdcClientConfig {
            api_key: "TEST_KEY".to_string(),
            base_url: base_url.to_string(),
            timeout,
        })
        .unwrap()
    }

    #[test]
    fn test_search_sends_query_page_size_and_key() {
        let body = r#"{"totalHits": 1, "foods": [{"fdcId": 1105073, "description": "Banana, raw", "dataType": "Survey (FNDDS)"}]}"#;
        let (base_url, server) = serve(vec![http_response("200 OK", body)]);

        let hits = client(&base_url, REQUEST_TIMEOUT).search_foods("Banana", 1).unwrap();
        assert_eq!(
            hits,
            vec![FoodSearchHit {
                fdc_id: 1105073,
                description: "Banana, raw".to_string()
            }]
        );

        let requests = server.join().unwrap();
        assert_eq!(
            requests[0],
            "GET /fdc/v1/foods/search?query=Banana&pageSize=1&api_key=TEST_KEY HTTP/1.1"
        );
    }

    #[test]
    fn test_search_without_foods_is_empty() {
        let (base_url, server) = serve(vec![
            http_response("200 OK", r#"{"totalHits": 0, "foods": []}"#),
            http_response("200 OK", r#"{"totalHits": 0}"#),
        ]);
        let client = client(&base_url, REQUEST_TIMEOUT);
        assert!(client.search_foods("Xyzzynotafood", 1).unwrap().is_empty());
        assert!(client.search_foods("Xyzzynotafood", 1).unwrap().is_empty());
        server.join().unwrap();
    }

    #[test]
    fn test_get_food_parses_nutrients() {
        let body = r#"{
            "fdcId": 1105073,
            "description": "Banana, raw",
            "foodNutrients": [
                {"type": "FoodNutrient", "nutrient": {"id": 1008, "number": "208", "name": "Energy", "unitName": "kcal"}, "amount": 89},
                {"type": "FoodNutrient", "nutrient": {"id": 1003, "number": "203", "name": "Protein", "unitName": "g"}, "amount": 1.1},
                {"type": "FoodNutrient", "nutrient": {"id": 1087, "name": "Calcium, Ca", "unitName": "mg"}},
                {"type": "FoodNutrient", "amount": 3.0}
            ]
        }"#;
        let (base_url, server) = serve(vec![http_response("200 OK", body)]);

        let details = client(&base_url, REQUEST_TIMEOUT).get_food(1105073).unwrap();
        assert_eq!(details.description, "Banana, raw");
        assert_eq!(details.nutrients().len(), 4);
        assert_eq!(details.nutrients()[0], FoodNutrientEntry::new(1008, 89.0));
        assert_eq!(details.nutrients()[2].amount, None);
        assert_eq!(details.nutrients()[3].nutrient, None);

        let requests = server.join().unwrap();
        assert_eq!(requests[0], "GET /fdc/v1/food/1105073?api_key=TEST_KEY HTTP/1.1");
    }

    #[test]
    fn test_non_success_status() {
        let (base_url, server) = serve(vec![http_response(
            "403 Forbidden",
            r#"{"error": {"code": "API_KEY_INVALID"}}"#,
        )]);
        let err = client(&base_url, REQUEST_TIMEOUT).search_foods("Banana", 1).unwrap_err();
        assert_eq!(err, FetchError::Status(403));
        assert!(!err.is_timeout());
        server.join().unwrap();
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let (base_url, server) = serve(vec![http_response("200 OK", "<html>oops</html>")]);
        let err = client(&base_url, REQUEST_TIMEOUT).get_food(1).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)), "got {:?}", err);
        server.join().unwrap();
    }

    #[test]
    fn test_slow_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/fdc/v1", listener.local_addr().unwrap());
        let _server = thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let _ = read_request_line(&mut stream);
                thread::sleep(Duration::from_secs(3));
            }
        });

        let err = client(&base_url, Duration::from_millis(250))
            .search_foods("Banana", 1)
            .unwrap_err();
        assert_eq!(err, FetchError::Timeout);
        assert!(err.is_timeout());
    }

    #[test]
    fn test_connection_refused_is_transport_error() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = format!("http://127.0.0.1:{}/fdc/v1", port);

        let err = client(&base_url, Duration::from_secs(5))
            .search_foods("Banana", 1)
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)), "got {:?}", err);
    }

    #[test]
    fn test_error_text_never_contains_api_key() {
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let base_url = format!("http://127.0.0.1:{}/fdc/v1", port);
        let err = client(&base_url, Duration::from_secs(5)).get_food(7).unwrap_err();
        assert!(!err.to_string().contains("TEST_KEY"));
    }

    #[test]
    fn test_client_config_requires_api_key() {
        assert_eq!(
            FdcClientConfig::from_config(&Config::default()).unwrap_err(),
            ConfigError::MissingCredential
        );
        let config = FdcClientConfig::from_config(&Config::default().with_api_key("k")).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.timeout, REQUEST_TIMEOUT);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
