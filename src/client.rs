use std::sync::Arc;
use tokio::sync::mpsc;
use log::{debug, error, info};
use crate::gateway::CompletionGateway;
use crate::studio::Studio;
use crate::{GenerateArgs, KillProcessArgs, StudioFoot, StudioHand};

/// Public API for the studio backend - owns the task
pub struct StudioBackend
{   hand: StudioHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl StudioBackend
{   /// Create and spawn a new backend around `studio`
    /// Returns immediately - spawns background task
    pub fn new<G>(studio: Studio<G>) -> Self
    where
      G: CompletionGateway + 'static
    {   debug!("Creating StudioBackend with task ownership");

        let (generate_tx, generate_rx)
          = mpsc::unbounded_channel();
        let (kill_process_tx, kill_process_rx)
          = mpsc::unbounded_channel();

        let hand = StudioHand
        {   generate_tx
          , kill_process_tx
        };

        let foot = StudioFoot
        {   generate_rx
          , kill_process_rx
        };

        let studio = Arc::new(studio);
        let _task_handle = tokio::spawn(async move {
          run_backend_loop(foot, studio).await
        });

        StudioBackend
        {   hand
          , _task_handle
        }
    }

    /// Queue a feature request - returns almost immediately
    pub async fn generate(
      &self
    , request: crate::schema::FeatureRequest
    ) -> Result<
        mpsc::UnboundedReceiver<crate::GenerateReply>,
        crate::error::Error
      >
    {   debug!("generate queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        let cmd = GenerateArgs
        {   request
          , reply: reply_tx
        };

        self.hand.generate_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel closed");
            crate::error::Error::BackendClosed
          })?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the backend
    pub async fn shutdown(self)
      -> Result<(), crate::error::Error>
    {   debug!("Shutting down StudioBackend");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        let cmd = KillProcessArgs
        {   reply: reply_tx
        };

        self.hand.kill_process_tx
          .send(cmd)
          .map_err(|_| {
            error!("Backend channel already closed");
            crate::error::Error::BackendClosed
          })?;

        // Wait for shutdown confirmation
        if let Some(result) = reply_rx.recv().await
        {   debug!("Backend shutdown confirmed");
            result
        } else
        {   error!("Backend shutdown not confirmed");
            Err(crate::error::Error::BackendClosed)
        }
    }
}

/// Main backend event loop
///
/// The select only routes: every request is served on its own task so a
/// slow or failing request never holds up another.
async fn run_backend_loop<G>(
  foot: StudioFoot
, studio: Arc<Studio<G>>
)
where
  G: CompletionGateway + 'static
{   debug!("Starting StudioBackend event loop");
    let StudioFoot
    {   mut generate_rx
      , mut kill_process_rx
    } = foot;

    loop
    { tokio::select!
      { Some(cmd) = generate_rx.recv() => {
          debug!("Received Generate");
          let studio = Arc::clone(&studio);
          tokio::spawn(async move {
            let GenerateArgs { request, reply } = cmd;
            let result = studio.run(&request).await;
            if let Err(e) = &result
            {   error!("Request failed ({}): {}", e.kind(), e);
            }
            let _ = reply.send(result);
          });
        }
      , Some(cmd) = kill_process_rx.recv() => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("StudioBackend shutting down");
          break;
        }
      , else => {
          debug!("All command channels closed");
          break;
        }
      }
    }
}
