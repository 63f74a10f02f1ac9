//! Configuration for the completion gateway

use serde::{Deserialize, Serialize};
use std::path::Path;
use log::debug;

pub const DEFAULT_API_URL: &str
  = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "google/gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str
  = "google/gemini-3-pro-image-preview";

pub const ENV_API_URL: &str = "GATEWAY_API_URL";
pub const ENV_API_KEY: &str = "GATEWAY_API_KEY";
pub const ENV_CHAT_MODEL: &str = "GATEWAY_CHAT_MODEL";
pub const ENV_IMAGE_MODEL: &str = "GATEWAY_IMAGE_MODEL";

/// Gateway configuration, read once at process start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig
{   /// Chat-completions endpoint
    pub api_url: String
  , /// Bearer credential
    pub api_key: Option<String>
  , /// Model used for structured generation
    pub chat_model: String
  , /// Model used for image generation
    pub image_model: String
  , /// Text generation timeout in seconds
    pub text_timeout_secs: u64
  , /// Image generation timeout in seconds
    pub image_timeout_secs: u64
}

impl Default for GatewayConfig
{   fn default() -> Self
    {   GatewayConfig
        {   api_url: DEFAULT_API_URL.to_string()
          , api_key: None
          , chat_model: DEFAULT_CHAT_MODEL.to_string()
          , image_model: DEFAULT_IMAGE_MODEL.to_string()
          , text_timeout_secs: 60
          , image_timeout_secs: 120
        }
    }
}

impl GatewayConfig
{   /// Defaults overlaid with the process environment
    pub fn from_env() -> Self
    {   Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults overlaid with whatever `lookup` resolves
    pub fn from_lookup<F>(lookup: F) -> Self
    where
      F: Fn(&str) -> Option<String>
    {   let mut config = GatewayConfig::default();
        if let Some(url) = non_empty(lookup(ENV_API_URL))
        {   config.api_url = url;
        }
        config.api_key = non_empty(lookup(ENV_API_KEY));
        if let Some(model) = non_empty(lookup(ENV_CHAT_MODEL))
        {   config.chat_model = model;
        }
        if let Some(model) = non_empty(lookup(ENV_IMAGE_MODEL))
        {   config.image_model = model;
        }
        debug!(
          "Gateway config: url={} chat_model={} key_present={}",
          config.api_url,
          config.chat_model,
          config.api_key.is_some()
        );
        config
    }

    /// Read a JSON config file; missing fields take defaults
    pub fn load(path: &Path) -> crate::error::Result<Self>
    {   let text = std::fs::read_to_string(path).map_err(|e| {
          crate::error::Error::Configuration(
            format!("read {}: {}", path.display(), e)
          )
        })?;
        let mut config: GatewayConfig = serde_json::from_str(&text)
          .map_err(|e| {
            crate::error::Error::Configuration(
              format!("parse {}: {}", path.display(), e)
            )
          })?;
        config.api_key = non_empty(config.api_key.take());
        Ok(config)
    }

    /// Credential, or a configuration error when absent
    pub fn require_key(&self) -> crate::error::Result<&str>
    {   self.api_key.as_deref().ok_or_else(|| {
          crate::error::Error::Configuration(
            format!("{} is not configured", ENV_API_KEY)
          )
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String>
{   value
      .map(|v| v.trim().to_string())
      .filter(|v| !v.is_empty())
}
