use reqwest::Client;
use tracing::{debug, warn};

use booking_core::{OrderConfirmation, OrderError, OrderGateway, OrderPayload};

/// Environment variable naming the order service base URL.
const ORDER_SERVICE_URL_VAR: &str = "ORDER_SERVICE_URL";

/// Environment variable carrying the optional order service API key.
const ORDER_SERVICE_API_KEY_VAR: &str = "ORDER_SERVICE_API_KEY";

/// Client for the external order-creation service.
pub struct OrderClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OrderClient {
    /// Create a new order service client.
    pub fn new(base_url: String, api_key: Option<String>) -> Result<Self, OrderError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| OrderError::Api(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    /// Create a client from `ORDER_SERVICE_URL` / `ORDER_SERVICE_API_KEY`.
    pub fn from_env() -> Result<Self, OrderError> {
        let base_url = std::env::var(ORDER_SERVICE_URL_VAR)
            .unwrap_or_else(|_| "http://localhost:8081/api".to_string());
        let api_key = std::env::var(ORDER_SERVICE_API_KEY_VAR).ok();

        Self::new(base_url, api_key)
    }

    /// Map a non-success response status to an order error.
    fn error_for_status(status: u16, body: String) -> OrderError {
        match status {
            409 => OrderError::Conflict(body),
            429 => OrderError::RateLimited,
            401 | 403 => OrderError::AuthenticationFailed,
            404 => OrderError::SiteNotFound,
            _ => OrderError::Api(format!("HTTP {} - {}", status, body)),
        }
    }
}

#[async_trait::async_trait]
impl OrderGateway for OrderClient {
    async fn create_order(&self, payload: &OrderPayload) -> Result<OrderConfirmation, OrderError> {
        debug!(
            "Creating order for site {} from {} to {}",
            payload.site_id, payload.check_in, payload.check_out
        );

        let url = format!("{}/orders", self.base_url);

        let mut request = self.client.post(&url).json(payload);

        if let Some(ref api_key) = self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| OrderError::Network(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            warn!("Order creation failed with status {}: {}", status, body);

            return Err(Self::error_for_status(status.as_u16(), body));
        }

        let confirmation: OrderConfirmation = response
            .json()
            .await
            .map_err(|e| OrderError::Api(format!("Failed to parse response: {}", e)))?;

        Ok(confirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_for_status() {
        assert!(matches!(
            OrderClient::error_for_status(409, "site already booked".to_string()),
            OrderError::Conflict(msg) if msg == "site already booked"
        ));
        assert!(matches!(
            OrderClient::error_for_status(429, String::new()),
            OrderError::RateLimited
        ));
        assert!(matches!(
            OrderClient::error_for_status(401, String::new()),
            OrderError::AuthenticationFailed
        ));
        assert!(matches!(
            OrderClient::error_for_status(403, String::new()),
            OrderError::AuthenticationFailed
        ));
        assert!(matches!(
            OrderClient::error_for_status(404, String::new()),
            OrderError::SiteNotFound
        ));
        assert!(matches!(
            OrderClient::error_for_status(500, "boom".to_string()),
            OrderError::Api(_)
        ));
    }

    #[test]
    fn test_from_env_falls_back_to_default_url() {
        // No env configured in the test environment
        let client = OrderClient::from_env().unwrap();
        assert!(client.base_url.starts_with("http"));
    }
}
