pub mod error;
pub mod config;
pub mod request;
pub mod gateway;
pub mod extract;
pub mod catalogue;
pub mod fallback;
pub mod prompts;
pub mod schema;
pub mod batch;
pub mod studio;
pub mod client;

/*

creato: structured generation for a creative-design backend.

Typed feature requests are turned into a (system, user, temperature)
prompt triple, sent through a single chat-completion gateway, and the
model's free text is reduced to one JSON payload. Batch features fan
out one call per catalogue variant and swap in a placeholder canvas
for every call that fails.

creato/
├── src/
│   ├── lib.rs          # Re-exports and backend channel types
│   ├── error.rs        # Error taxonomy
│   ├── config.rs       # Gateway configuration
│   ├── request.rs      # Completion request/result, wire format
│   ├── gateway/        # Gateway trait + HTTP implementation
│   ├── extract.rs      # JSON recovery from model text
│   ├── prompts/        # One builder per feature
│   ├── catalogue.rs    # Channel and style catalogues
│   ├── fallback.rs     # Placeholder canvases
│   ├── batch.rs        # Per-variant generation with fallback
│   ├── schema.rs       # Feature requests and responses
│   ├── studio.rs       # Feature facade
│   ├── client.rs       # Backend task owning a Studio
│   └── main.rs         # CLI
└── tests/

*/

pub use batch::BatchOrchestrator;
pub use catalogue::VariantDescriptor;
pub use client::StudioBackend;
pub use config::GatewayConfig;
pub use error::{Error, ParseFailure};
pub use extract::{extract, ExtractedPayload};
pub use gateway::{CompletionGateway, HttpGateway};
pub use prompts::{Feature, PromptInput, PromptSpec};
pub use request::{CompletionRequest, CompletionResult};
pub use schema::{FeatureRequest, VariationResult};
pub use studio::Studio;

/// STUDIO BACKEND INTERFACE:

// ===== Generate =====

pub type GenerateReply = Result<serde_json::Value, crate::error::Error>;
pub type GenerateReplySender
  = tokio::sync::mpsc::UnboundedSender<GenerateReply>;

pub struct GenerateArgs
{   pub request: crate::schema::FeatureRequest
  , pub reply: GenerateReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== StudioHand (sender side) =====

pub struct StudioHand
{   pub generate_tx
      : tokio::sync::mpsc::UnboundedSender<GenerateArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== StudioFoot (receiver side) =====

pub struct StudioFoot
{   pub generate_rx
      : tokio::sync::mpsc::UnboundedReceiver<GenerateArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}
