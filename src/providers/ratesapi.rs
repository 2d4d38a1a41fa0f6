use async_trait::async_trait;
use reqwest::{Proxy, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::config::{ProviderConfig, ProxyConfig};
use crate::core::{RateRecord, RatesError, RatesProvider};

const USER_AGENT: &str = concat!("ratesapi/", env!("CARGO_PKG_VERSION"));

fn apply_proxy(
    mut builder: reqwest::ClientBuilder,
    proxy: &ProxyConfig,
) -> Result<reqwest::ClientBuilder, reqwest::Error> {
    if let Some(url) = &proxy.http {
        builder = builder.proxy(Proxy::http(url)?);
    }
    if let Some(url) = &proxy.https {
        builder = builder.proxy(Proxy::https(url)?);
    }
    if let Some(url) = &proxy.all {
        builder = builder.proxy(Proxy::all(url)?);
    }
    Ok(builder)
}

/// Fetches rate records over HTTP.
pub struct HttpRatesProvider {
    client: reqwest::Client,
}

impl HttpRatesProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self, RatesError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(proxy) = config.proxy.as_ref().filter(|p| !p.is_empty()) {
            debug!(?proxy, "Routing rate requests through proxy");
            builder = apply_proxy(builder, proxy).map_err(RatesError::Client)?;
        }
        let client = builder.build().map_err(RatesError::Client)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RatesProvider for HttpRatesProvider {
    #[instrument(name = "RatesFetch", skip_all, fields(url = %url))]
    async fn fetch_rates(&self, url: &str) -> Result<RateRecord, RatesError> {
        debug!("Requesting rates from {}", url);

        let transport = |source: reqwest::Error| RatesError::Transport {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, "Error returning data from rates API");
            return Err(RatesError::Remote {
                status,
                url: url.to_string(),
            });
        }

        let text = response.text().await.map_err(transport)?;
        serde_json::from_str(&text).map_err(|source| RatesError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider() -> HttpRatesProvider {
        HttpRatesProvider::new(&ProviderConfig::default()).unwrap()
    }

    async fn create_mock_server(request_path: &str, template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(template)
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{"base":"EUR","rates":{"GBP":0.86,"USD":1.19},"date":"2021-04-13"}"#;
        let mock_server = create_mock_server(
            "/2021-04-13",
            ResponseTemplate::new(200).set_body_string(mock_response),
        )
        .await;

        let url = format!("{}/2021-04-13", mock_server.uri());
        let record = provider().fetch_rates(&url).await.unwrap();
        assert_eq!(record.date, "2021-04-13");
        assert_eq!(record.base, "EUR");
        assert_eq!(record.rate("USD"), Some(1.19));
    }

    #[tokio::test]
    async fn test_base_query_is_sent() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("base", "USD"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"base":"USD","rates":{"EUR":0.84},"date":"2021-04-15"}"#),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let url = format!("{}/latest?base=USD", mock_server.uri());
        let record = provider().fetch_rates(&url).await.unwrap();
        assert_eq!(record.base, "USD");
    }

    #[tokio::test]
    async fn test_rates_api_error_response() {
        let mock_server = create_mock_server("/latest", ResponseTemplate::new(500)).await;

        let url = format!("{}/latest", mock_server.uri());
        let err = provider().fetch_rates(&url).await.unwrap_err();
        match err {
            RatesError::Remote { status, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
            }
            other => panic!("Expected a remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rates_api_malformed_response() {
        let mock_server = create_mock_server(
            "/latest",
            ResponseTemplate::new(200).set_body_string(r#"{"error":"time data unknown"}"#),
        )
        .await;

        let url = format!("{}/latest", mock_server.uri());
        let err = provider().fetch_rates(&url).await.unwrap_err();
        assert!(matches!(err, RatesError::Decode { .. }));
        assert!(err.to_string().contains("failed to parse rates response"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let err = provider()
            .fetch_rates("http://127.0.0.1:1/latest")
            .await
            .unwrap_err();
        assert!(matches!(err, RatesError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let mock_server = create_mock_server(
            "/latest",
            ResponseTemplate::new(200)
                .set_body_string(r#"{"base":"EUR","rates":{},"date":"2021-04-15"}"#)
                .set_delay(Duration::from_secs(3)),
        )
        .await;
        let config = ProviderConfig {
            timeout_secs: 1,
            ..ProviderConfig::default()
        };

        let url = format!("{}/latest", mock_server.uri());
        let err = HttpRatesProvider::new(&config)
            .unwrap()
            .fetch_rates(&url)
            .await
            .unwrap_err();
        match err {
            RatesError::Transport { source, .. } => assert!(source.is_timeout()),
            other => panic!("Expected a timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_proxy_url_is_client_error() {
        let config = ProviderConfig {
            proxy: Some(ProxyConfig {
                all: Some("http://[::1".to_string()),
                ..ProxyConfig::default()
            }),
            ..ProviderConfig::default()
        };

        let result = HttpRatesProvider::new(&config);
        assert!(matches!(result, Err(RatesError::Client(_))));
    }

    #[tokio::test]
    async fn test_proxy_config_builds_client() {
        let config = ProviderConfig {
            proxy: Some(ProxyConfig {
                http: Some("http://10.10.1.10:3128".to_string()),
                https: Some("http://10.10.1.10:1080".to_string()),
                all: None,
            }),
            ..ProviderConfig::default()
        };

        assert!(HttpRatesProvider::new(&config).is_ok());
    }
}
