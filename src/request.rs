//! Completion request/response types and the chat-completions wire format

use serde::{Deserialize, Serialize};

/// One structured-generation call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest
{   pub system_prompt: String
  , pub user_prompt: String
  , /// Sampling temperature, valid in [0, 2]
    pub temperature: f32
  , pub model: String
  , /// Tool definitions forwarded verbatim
    pub tools: Option<Vec<serde_json::Value>>
}

impl CompletionRequest
{   pub fn new(
      system_prompt: impl Into<String>
    , user_prompt: impl Into<String>
    , temperature: f32
    , model: impl Into<String>
    ) -> Self
    {   CompletionRequest
        {   system_prompt: system_prompt.into()
          , user_prompt: user_prompt.into()
          , temperature
          , model: model.into()
          , tools: None
        }
    }

    /// Build from a prompt triple for the given model
    pub fn from_prompt(
      prompt: crate::prompts::PromptSpec
    , model: impl Into<String>
    ) -> Self
    {   CompletionRequest::new(
          prompt.system
        , prompt.user
        , prompt.temperature
        , model
        )
    }

    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self
    {   self.tools = Some(tools);
        self
    }

    /// Reject temperatures outside [0, 2]
    pub fn validate(&self) -> crate::error::Result<()>
    {   if !(0.0..=2.0).contains(&self.temperature)
        {   return Err(crate::error::Error::InvalidRequest(
              format!(
                "temperature {} outside [0, 2]",
                self.temperature
              )
            ));
        }
        Ok(())
    }

    /// Wire body for the gateway
    pub fn to_body(&self) -> ChatCompletionBody
    {   ChatCompletionBody
        {   model: self.model.clone()
          , messages: vec![
              ChatMessage::system(&self.system_prompt)
            , ChatMessage::user(&self.user_prompt)
            ]
          , temperature: Some(self.temperature)
          , tools: self.tools.clone()
        }
    }
}

/// Assistant text from the gateway's first choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionResult
{   pub raw_text: String
}

// ===== Wire Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , #[serde(default)]
    pub content: Option<String>
}

impl ChatMessage
{   pub fn system(content: &str) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: Some(content.to_string())
        }
    }

    pub fn user(content: &str) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: Some(content.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionBody
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<serde_json::Value>>
}

impl ChatCompletionBody
{   /// User-only body used for image generation
    pub fn image(model: &str, prompt: &str) -> Self
    {   ChatCompletionBody
        {   model: model.to_string()
          , messages: vec![ChatMessage::user(prompt)]
          , temperature: None
          , tools: None
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ChatMessage
}

impl ChatCompletionResponse
{   /// Content of the first choice; absent or blank text is an error
    pub fn first_content(self) -> crate::error::Result<String>
    {   let choice = self.choices.into_iter().next()
          .ok_or(crate::error::Error::NoChoicesInResponse)?;
        match choice.message.content
        {   Some(text) if !text.trim().is_empty() => Ok(text)
          , _ => Err(crate::error::Error::EmptyContent)
        }
    }
}
