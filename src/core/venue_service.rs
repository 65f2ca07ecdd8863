use crate::core::{ConfigProvider, VenueApi};
use crate::domain::model::{DataEnvelope, Venue, VenueReview};
use crate::utils::error::{Result, VenueError};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use url::{form_urlencoded, Url};

const VENUE_PATH: [&str; 2] = ["api", "venue"];
const LIST_SEGMENT: &str = "list";
const USER_AGENT: &str = concat!("venue-client/", env!("CARGO_PKG_VERSION"));

/// 場所 API 的 HTTP 客戶端。
///
/// 不做快取、重試或逾時控制；傳輸層錯誤原封不動回傳給呼叫端。
#[derive(Debug, Clone)]
pub struct VenueService {
    client: Client,
    base_url: Url,
}

impl VenueService {
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        validate_url("api.base_url", base_url)?;

        let base_url = Url::parse(base_url).map_err(|e| VenueError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(VenueError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: base_url.to_string(),
                reason: "URL cannot carry a path".to_string(),
            });
        }

        Ok(Self { client, base_url })
    }

    /// 依設定建立 reqwest Client（預設標頭與 User-Agent）後再建構服務
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in config.default_headers() {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                VenueError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: key.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            // 標頭值可能含有憑證，錯誤訊息只帶標頭名稱
            let value = HeaderValue::from_str(value).map_err(|e| {
                VenueError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: key.clone(),
                    reason: format!("Invalid header value: {}", e),
                }
            })?;
            // HeaderName 已轉為小寫，大小寫不同的重複名稱在這裡會撞在一起
            if headers.contains_key(&name) {
                return Err(VenueError::InvalidConfigValueError {
                    field: "api.headers".to_string(),
                    value: key.clone(),
                    reason: "Header is configured more than once (names are case-insensitive)"
                        .to_string(),
                });
            }
            headers.insert(name, value);
        }

        tracing::debug!(
            "Building HTTP client for {} with {} default header(s)",
            config.api_base_url(),
            headers.len()
        );

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Self::new(client, config.api_base_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/api/venue/{segment}`，segment 會以單一路徑段落編碼
    fn endpoint(&self, segment: &str) -> Result<Url> {
        // url 會把 "." 與 ".." 當成相對路徑吃掉（連 %2E 也會被正規化），只能拒絕
        if segment == "." || segment == ".." {
            return Err(VenueError::ValidationError {
                message: format!("'{}' is not a usable venue id", segment),
            });
        }

        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments =
                url.path_segments_mut()
                    .map_err(|_| VenueError::InvalidConfigValueError {
                        field: "api.base_url".to_string(),
                        value: self.base_url.to_string(),
                        reason: "URL cannot carry a path".to_string(),
                    })?;
            segments.pop_if_empty().extend(VENUE_PATH).push(segment);
        }
        Ok(url)
    }

    async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
        tracing::debug!("API response status: {}", response.status());
        let envelope: DataEnvelope<T> = response.error_for_status()?.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl VenueApi for VenueService {
    async fn get_venue(&self, google_maps_id: &str) -> Result<Venue> {
        let url = self.endpoint(google_maps_id)?;

        tracing::debug!("Making API request: GET {}", url);
        let response = self.client.get(url).send().await?;

        Self::unwrap_envelope(response).await
    }

    async fn get_venues(&self, google_maps_ids: &[String]) -> Result<Vec<Venue>> {
        if google_maps_ids.is_empty() {
            tracing::debug!("No venue ids requested, skipping API call");
            return Ok(Vec::new());
        }

        let venues = google_maps_ids
            .iter()
            .map(|id| form_urlencoded::byte_serialize(id.as_bytes()).collect::<String>())
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint(LIST_SEGMENT)?;
        url.set_query(Some(&format!("venues={}", venues)));

        tracing::debug!("Making API request: GET {}", url);
        let response = self.client.get(url).send().await?;

        let venues: Vec<Venue> = Self::unwrap_envelope(response).await?;
        tracing::debug!(
            "Received {} of {} requested venues",
            venues.len(),
            google_maps_ids.len()
        );
        Ok(venues)
    }

    async fn post_venue_review(&self, review: &VenueReview) -> Result<Venue> {
        let url = self.endpoint(review.google_maps_id())?;

        tracing::debug!("Making API request: POST {}", url);
        let response = self.client.post(url).json(review).send().await?;

        Self::unwrap_envelope(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SmokingPolicy;
    use httpmock::prelude::*;
    use std::collections::HashMap;

    struct MockConfig {
        api_base_url: String,
        headers: HashMap<String, String>,
    }

    impl MockConfig {
        fn new(api_base_url: String) -> Self {
            Self {
                api_base_url,
                headers: HashMap::new(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn default_headers(&self) -> &HashMap<String, String> {
            &self.headers
        }
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        assert!(VenueService::new(Client::new(), "not a url").is_err());
        assert!(VenueService::new(Client::new(), "ftp://example.com").is_err());
        assert!(VenueService::new(Client::new(), "").is_err());
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_id() {
        let service = VenueService::new(Client::new(), "https://example.com/app/").unwrap();

        assert_eq!(
            service.endpoint("ChIJ123").unwrap().as_str(),
            "https://example.com/app/api/venue/ChIJ123"
        );
        assert_eq!(
            service.endpoint("a/b c").unwrap().as_str(),
            "https://example.com/app/api/venue/a%2Fb%20c"
        );
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        let service = VenueService::new(Client::new(), "https://example.com/app/").unwrap();

        assert!(matches!(
            service.endpoint("."),
            Err(VenueError::ValidationError { .. })
        ));
        assert!(matches!(
            service.endpoint(".."),
            Err(VenueError::ValidationError { .. })
        ));
        assert_eq!(
            service.endpoint("...").unwrap().as_str(),
            "https://example.com/app/api/venue/..."
        );
    }

    #[test]
    fn test_from_config_rejects_headers_differing_only_in_case() {
        let mut config = MockConfig::new("https://example.com".to_string());
        config
            .headers
            .insert("Authorization".to_string(), "Bearer a".to_string());
        config
            .headers
            .insert("authorization".to_string(), "Bearer b".to_string());

        let result = VenueService::from_config(&config);
        assert!(matches!(
            result,
            Err(VenueError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_endpoint_drops_base_query() {
        let service = VenueService::new(Client::new(), "https://example.com?debug=1").unwrap();
        assert_eq!(
            service.endpoint("x").unwrap().as_str(),
            "https://example.com/api/venue/x"
        );
    }

    #[test]
    fn test_from_config_rejects_bad_header_name() {
        let mut config = MockConfig::new("https://example.com".to_string());
        config
            .headers
            .insert("bad header".to_string(), "value".to_string());

        let result = VenueService::from_config(&config);
        assert!(matches!(
            result,
            Err(VenueError::InvalidConfigValueError { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_venue_unwraps_data_envelope() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/venue/ChIJ123");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": {"GoogleMapsId": "ChIJ123", "Name": "Cafe X"}
                }));
        });

        let service = VenueService::new(Client::new(), &server.base_url()).unwrap();
        let venue = service.get_venue("ChIJ123").await.unwrap();

        api_mock.assert();
        assert_eq!(venue.google_maps_id, "ChIJ123");
        assert_eq!(venue.name.as_deref(), Some("Cafe X"));
    }

    #[tokio::test]
    async fn test_get_venues_sends_comma_separated_ids() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/venue/list")
                .query_param("venues", "a,b");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": [{"GoogleMapsId": "a"}, {"GoogleMapsId": "b"}]
                }));
        });

        let service = VenueService::new(Client::new(), &server.base_url()).unwrap();
        let venues = service
            .get_venues(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        api_mock.assert();
        assert_eq!(venues.len(), 2);
        assert_eq!(venues[1].google_maps_id, "b");
    }

    #[tokio::test]
    async fn test_get_venues_empty_list_makes_no_request() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.path_contains("/api/venue");
            then.status(200);
        });

        let service = VenueService::new(Client::new(), &server.base_url()).unwrap();
        let venues = service.get_venues(&[]).await.unwrap();

        assert!(venues.is_empty());
        api_mock.assert_hits(0);
    }

    #[tokio::test]
    async fn test_post_venue_review_sends_review_body() {
        let server = MockServer::start();
        let review = VenueReview::new("x").with_smoking_policy(SmokingPolicy::SmokingProhibited);

        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/venue/x")
                .json_body(serde_json::json!({
                    "GoogleMapsId": "x",
                    "SmokingPolicy": 2,
                    "SmokingPolicySpecified": true,
                    "AirQualitySmokersSpecified": false,
                    "AirQualityNonsmokersSpecified": false
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": {"GoogleMapsId": "x", "SmokingPolicy": 2}
                }));
        });

        let service = VenueService::new(Client::new(), &server.base_url()).unwrap();
        let venue = service.post_venue_review(&review).await.unwrap();

        api_mock.assert();
        assert_eq!(venue.smoking_policy, Some(SmokingPolicy::SmokingProhibited));
    }

    #[tokio::test]
    async fn test_server_error_is_propagated() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/venue/missing");
            then.status(404).body("Not found");
        });

        let service = VenueService::new(Client::new(), &server.base_url()).unwrap();
        let err = service.get_venue("missing").await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, VenueError::ApiError(_)));
        assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_from_config_sends_default_headers() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/venue/abc")
                .header("Authorization", "Bearer secret");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": {"GoogleMapsId": "abc"}}));
        });

        let mut config = MockConfig::new(server.base_url());
        config
            .headers
            .insert("Authorization".to_string(), "Bearer secret".to_string());

        let service = VenueService::from_config(&config).unwrap();
        service.get_venue("abc").await.unwrap();

        api_mock.assert();
    }
}
