// HTTP gateway implementation over the rover backend REST API
use crate::application::gateway::RoverGateway;
use crate::domain::instruction::Instruction;
use crate::domain::mapping::PolarSample;
use crate::domain::status::{BatteryLevel, StatusMessage};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend answered {0}")]
    Status(StatusCode),
}

#[derive(Debug, Clone)]
pub struct HttpRoverGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRoverGateway {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// GET a JSON payload. The backend answers 204 when no value exists yet;
    /// that maps to `Ok(None)`, any other non-2xx is an error.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(GatewayError::Status(response.status()));
        }

        Ok(Some(response.json::<T>().await?))
    }

    /// Transport and payload failures degrade to "no data this tick".
    async fn poll_latest<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.get_json(path).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(path, error = %e, "poll failed, keeping last known value");
                None
            }
        }
    }
}

#[async_trait]
impl RoverGateway for HttpRoverGateway {
    async fn send_instruction(&self, instruction: Instruction) -> anyhow::Result<()> {
        let url = format!("{}/instruction", self.base_url);
        let body = serde_json::json!({ "instruction": instruction.as_str() });

        let response = self.client.post(&url).json(&body).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("instruction {} rejected with status {}", instruction, response.status());
        }
        tracing::debug!(%instruction, "instruction sent");
        Ok(())
    }

    async fn latest_battery(&self) -> Option<BatteryLevel> {
        self.poll_latest("/battery-level/last").await
    }

    async fn latest_message(&self) -> Option<StatusMessage> {
        self.poll_latest("/message/last").await
    }

    async fn latest_mapping_value(&self) -> Option<PolarSample> {
        self.poll_latest("/mappingValue/last").await
    }

    async fn mapping_values(&self) -> Vec<PolarSample> {
        self.poll_latest::<Vec<PolarSample>>("/mappingValue/values")
            .await
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve one canned HTTP response on an ephemeral port and return the
    /// base URL pointing at it.
    async fn serve_once(response: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_base_url_is_normalized() {
        let gateway = HttpRoverGateway::new("http://localhost:8080/");
        assert_eq!(gateway.base_url, "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_backend_degrades_to_sentinels() {
        // Nothing listens on this port; every poll must degrade, not error.
        let gateway = HttpRoverGateway::new("http://127.0.0.1:1");
        assert!(gateway.latest_battery().await.is_none());
        assert!(gateway.latest_message().await.is_none());
        assert!(gateway.mapping_values().await.is_empty());
        assert!(gateway.send_instruction(Instruction::Brake).await.is_err());
    }

    #[tokio::test]
    async fn test_battery_payload_is_decoded() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 12\r\n\r\n{\"level\":75}",
        )
        .await;
        let gateway = HttpRoverGateway::new(&base);
        assert_eq!(gateway.latest_battery().await, Some(BatteryLevel { level: 75.0 }));
    }

    #[tokio::test]
    async fn test_no_content_means_no_value_yet() {
        // The backend answers 204 when nothing has been recorded.
        let base = serve_once("HTTP/1.1 204 No Content\r\ncontent-length: 0\r\n\r\n").await;
        let gateway = HttpRoverGateway::new(&base);
        assert_eq!(gateway.latest_battery().await, None);
    }

    #[tokio::test]
    async fn test_malformed_payload_degrades_to_none() {
        let base = serve_once(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 8\r\n\r\nnot-json",
        )
        .await;
        let gateway = HttpRoverGateway::new(&base);
        assert_eq!(gateway.latest_battery().await, None);
    }

    #[tokio::test]
    async fn test_server_error_degrades_to_empty_list() {
        let base = serve_once("HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\n\r\n").await;
        let gateway = HttpRoverGateway::new(&base);
        assert!(gateway.mapping_values().await.is_empty());
    }
}
