use std::sync::OnceLock;
use std::time::Duration;
use log::{debug, trace, error};
use regex::Regex;
use crate::config::GatewayConfig;
use crate::error::Error;
use crate::request::{
  ChatCompletionBody, ChatCompletionResponse, CompletionRequest,
  CompletionResult,
};

fn image_url_pattern() -> &'static Regex
{   static IMAGE_URL: OnceLock<Regex> = OnceLock::new();
    IMAGE_URL.get_or_init(|| {
      Regex::new(r#"https?://[^\s"']+\.(?:png|jpg|jpeg|webp)"#)
        .expect("image url pattern is valid")
    })
}

/// First image URL in `text`, or `text` unchanged
pub fn scan_image_url(text: &str) -> String
{   image_url_pattern()
      .find(text)
      .map(|m| m.as_str().to_string())
      .unwrap_or_else(|| text.to_string())
}

/// Gateway client speaking the chat-completions protocol over HTTP
#[derive(Debug, Clone)]
pub struct HttpGateway
{   config: GatewayConfig
  , http_client: reqwest::Client
}

impl HttpGateway
{   pub fn new(config: GatewayConfig) -> Self
    {   debug!("Creating HttpGateway for {}", config.api_url);
        HttpGateway
        {   config
          , http_client: reqwest::Client::new()
        }
    }

    pub fn config(&self) -> &GatewayConfig
    {   &self.config
    }

    /// POST one body, map the status, return the first choice's text
    async fn send(
      &self
    , api_key: &str
    , body: &ChatCompletionBody
    , timeout: Duration
    ) -> crate::error::Result<String>
    {   trace!("Gateway request: {:?}", body);

        let response = self.http_client
          .post(&self.config.api_url)
          .header("Authorization", format!("Bearer {}", api_key))
          .header("Content-Type", "application/json")
          .timeout(timeout)
          .json(body)
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            if e.is_timeout()
            {   Error::Timeout
            } else
            {   Error::Http(e.to_string())
            }
          })?;

        let status = response.status();
        trace!("Gateway response status: {}", status);

        if status.as_u16() == 429
        {   error!("Gateway rate limit exceeded");
            return Err(Error::RateLimited);
        }

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("Gateway error {}: {}", status, error_text);
            return Err(Error::Gateway { status: status.as_u16() });
        }

        let chat_response: ChatCompletionResponse
          = response.json().await.map_err(|e| {
            error!("Response decode error: {}", e);
            if e.is_timeout()
            {   Error::Timeout
            } else
            {   Error::InvalidResponse(e.to_string())
            }
          })?;

        chat_response.first_content().map_err(|e| {
          error!("Unusable gateway response: {}", e);
          e
        })
    }
}

impl super::CompletionGateway for HttpGateway
{   async fn complete(
      &self
    , request: &CompletionRequest
    ) -> crate::error::Result<CompletionResult>
    {   let api_key = self.config.require_key()?;
        request.validate()?;
        debug!(
          "Completion: model={} temperature={}",
          request.model, request.temperature
        );

        let raw_text = self.send(
            api_key
          , &request.to_body()
          , Duration::from_secs(self.config.text_timeout_secs)
          ).await?;

        debug!("Completion returned {} bytes", raw_text.len());
        Ok(CompletionResult { raw_text })
    }

    async fn generate_image(
      &self
    , prompt: &str
    ) -> crate::error::Result<String>
    {   let api_key = self.config.require_key()?;
        debug!("Image generation: model={}", self.config.image_model);

        let body = ChatCompletionBody::image(
            &self.config.image_model
          , prompt
          );
        let content = self.send(
            api_key
          , &body
          , Duration::from_secs(self.config.image_timeout_secs)
          ).await?;

        Ok(scan_image_url(&content))
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn first_image_url_wins()
    {   let text = "Here: https://cdn.example.com/a/bg.webp and https://x.io/b.png";
        assert_eq!(scan_image_url(text), "https://cdn.example.com/a/bg.webp");
    }

    #[test]
    fn quoted_url_stops_at_quote()
    {   let text = r#"{"url": "http://img.example.com/p.jpeg"}"#;
        assert_eq!(scan_image_url(text), "http://img.example.com/p.jpeg");
    }

    #[test]
    fn text_without_url_is_returned_as_is()
    {   let text = "data:image/png;base64,AAAA";
        assert_eq!(scan_image_url(text), text);
    }
}
