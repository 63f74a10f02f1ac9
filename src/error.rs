use std::fmt;

/// Why a JSON payload could not be recovered from model text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure
{   /// Neither a fenced block nor a brace span was present
    NoJsonFound
  , /// A span was found but did not parse
    MalformedJson(String)
}

impl fmt::Display for ParseFailure
{   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {   match self
        {   ParseFailure::NoJsonFound => {
              write!(f, "no JSON found")
            }
          , ParseFailure::MalformedJson(msg) => {
              write!(f, "malformed JSON: {}", msg)
            }
        }
    }
}

/// Custom error type for creato operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// Gateway credential or endpoint missing
    Configuration(String)
  , /// Gateway answered 429
    RateLimited
  , /// Gateway answered any other non-success status
    Gateway
    {   status: u16
    }
  , /// Transport failure before a status was received
    Http(String)
  , /// Request exceeded its timeout
    Timeout
  , /// Gateway body was not a chat completion
    InvalidResponse(String)
  , /// Local result could not be rendered as JSON
    Serialization(String)
  , /// No choices in gateway response
    NoChoicesInResponse
  , /// First choice carried no text
    EmptyContent
  , /// Model text held no usable JSON
    Parse(ParseFailure)
  , /// Caller supplied an unusable request
    InvalidRequest(String)
  , /// Requested variant ids missing from the catalogue
    UnknownVariants(Vec<String>)
  , /// Variant selection came out empty
    EmptySelection
  , /// Backend task is gone
    BackendClosed
}

impl Error
{   /// Short stable label for the failure kind
    pub fn kind(&self) -> &'static str
    {   match self
        {   Error::Configuration(_) => "configuration"
          , Error::RateLimited => "rate_limited"
          , Error::Gateway { .. } => "gateway"
          , Error::Http(_) => "transport"
          , Error::Timeout => "timeout"
          , Error::InvalidResponse(_)
          | Error::NoChoicesInResponse
          | Error::EmptyContent => "invalid_response"
          , Error::Parse(_) => "parse"
          , Error::Serialization(_) => "serialization"
          , Error::InvalidRequest(_)
          | Error::UnknownVariants(_)
          | Error::EmptySelection => "invalid_request"
          , Error::BackendClosed => "backend_closed"
        }
    }

    /// HTTP status an endpoint should answer with
    pub fn status_hint(&self) -> u16
    {   match self
        {   Error::InvalidRequest(_)
          | Error::UnknownVariants(_)
          | Error::EmptySelection => 400
          , Error::RateLimited => 429
          , _ => 500
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::Configuration(msg) => {
              write!(f, "Configuration error: {}", msg)
            }
          , Error::RateLimited => {
              write!(f, "Rate limit exceeded")
            }
          , Error::Gateway { status } => {
              write!(f, "AI gateway error: {}", status)
            }
          , Error::Http(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::InvalidResponse(msg) => {
              write!(f, "Invalid gateway response: {}", msg)
            }
          , Error::Serialization(msg) => {
              write!(f, "Serialization error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "Gateway response contained no choices")
            }
          , Error::EmptyContent => {
              write!(f, "Gateway response content was empty")
            }
          , Error::Parse(reason) => {
              write!(f, "Parse error: {}", reason)
            }
          , Error::InvalidRequest(msg) => {
              write!(f, "Invalid request: {}", msg)
            }
          , Error::UnknownVariants(ids) => {
              write!(f, "Unknown variant ids: {}", ids.join(", "))
            }
          , Error::EmptySelection => {
              write!(f, "No variants selected")
            }
          , Error::BackendClosed => {
              write!(f, "Backend disconnected")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<ParseFailure> for Error
{   fn from(reason: ParseFailure) -> Self
    {   Error::Parse(reason)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
