//! Client side of `/api/ask`, used by the CLI to drive an `Explorer`.

use std::time::Duration;

use serde::Serialize;

use orrery_engine::AskFailure;

use crate::routes::AskResponse;

#[derive(Serialize)]
struct AskBody<'a> {
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct AskClient {
    http: reqwest::Client,
    base_url: String,
}

impl AskClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AskFailure> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AskFailure::Transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/api/ask", self.base_url.trim_end_matches('/'))
    }

    /// POST a finished prompt and return the answer text.
    pub async fn ask(&self, prompt: &str, model: Option<&str>) -> Result<String, AskFailure> {
        let response = self
            .http
            .post(self.endpoint())
            .json(&AskBody { prompt, model })
            .send()
            .await
            .map_err(|e| AskFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AskFailure::Status(status.as_u16()));
        }
        let body: AskResponse = response
            .json()
            .await
            .map_err(|e| AskFailure::Decode(e.to_string()))?;
        Ok(body.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base() {
        let client = AskClient::new("http://127.0.0.1:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:3000/api/ask");
    }

    #[test]
    fn model_is_omitted_when_unset() {
        let body = serde_json::to_value(AskBody { prompt: "hi", model: None }).unwrap();
        assert_eq!(body, serde_json::json!({ "prompt": "hi" }));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_failure() {
        // port 9 (discard) on localhost is almost never listening
        let client = AskClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.ask("hi", None).await.unwrap_err();
        assert!(matches!(err, AskFailure::Transport(_)), "{err:?}");
    }
}
