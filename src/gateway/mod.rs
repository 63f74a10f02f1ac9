//! Completion gateway seam and its HTTP implementation

use std::future::Future;
use crate::request::{CompletionRequest, CompletionResult};

pub mod http;

// Re-export for convenience
pub use http::HttpGateway;

/// A single-attempt chat-completion service.
///
/// Implementations never retry; callers decide whether to retry or
/// substitute a fallback.
pub trait CompletionGateway: Send + Sync
{   /// One system+user completion
    fn complete(
      &self
    , request: &CompletionRequest
    ) -> impl Future<Output = crate::error::Result<CompletionResult>> + Send;

    /// Generate an image and return its URL (or the raw text when no
    /// URL is present)
    fn generate_image(
      &self
    , prompt: &str
    ) -> impl Future<Output = crate::error::Result<String>> + Send;
}
