//! Multi-call generation with per-variant fallback
//!
//! Each variant gets one gateway call and one extraction. Any failure in
//! either step is absorbed locally: that variant's canvas becomes the
//! deterministic placeholder and the batch moves on. Output order always
//! matches input order, one result per variant.

use log::{debug, info, warn};
use crate::catalogue::VariantDescriptor;
use crate::error::Error;
use crate::extract::{extract, ExtractedPayload};
use crate::fallback::synthesize;
use crate::gateway::CompletionGateway;
use crate::request::CompletionRequest;
use crate::schema::VariationResult;

/// Drives one gateway call per variant
#[derive(Debug)]
pub struct BatchOrchestrator<'g, G>
{   gateway: &'g G
}

impl<'g, G> BatchOrchestrator<'g, G>
where
  G: CompletionGateway
{   pub fn new(gateway: &'g G) -> Self
    {   BatchOrchestrator { gateway }
    }

    /// Generate one canvas per variant, substituting placeholders for
    /// failed calls
    pub async fn run<F>(
      &self
    , variants: &[VariantDescriptor]
    , make_request: F
    ) -> Vec<VariationResult>
    where
      F: Fn(&VariantDescriptor) -> CompletionRequest
    {   debug!("Batch of {} variants", variants.len());
        let mut results = Vec::with_capacity(variants.len());
        let mut degraded = 0usize;

        for variant in variants
        {   let canvas_data = match self.generate(variant, &make_request).await
            {   Ok(payload) => payload
              , Err(e) => {
                  warn!(
                    "Variant {} failed ({}): {}; using placeholder",
                    variant.id,
                    e.kind(),
                    e
                  );
                  degraded += 1;
                  synthesize(variant)
                }
            };
            results.push(VariationResult
            {   variant: *variant
              , canvas_data
            });
        }

        info!(
          "Batch finished: {} generated, {} placeholders",
          results.len() - degraded,
          degraded
        );
        results
    }

    async fn generate<F>(
      &self
    , variant: &VariantDescriptor
    , make_request: &F
    ) -> Result<ExtractedPayload, Error>
    where
      F: Fn(&VariantDescriptor) -> CompletionRequest
    {   let request = make_request(variant);
        let completion = self.gateway.complete(&request).await?;
        Ok(extract(&completion.raw_text)?)
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use std::sync::Mutex;
    use serde_json::json;
    use crate::catalogue::{CHANNEL_FORMATS, STYLE_VARIATIONS};
    use crate::request::CompletionResult;

    /// Answers by call order from a fixed script
    struct ScriptedGateway
    {   replies: Mutex<Vec<Result<String, Error>>>
      , seen: Mutex<Vec<String>>
    }

    impl ScriptedGateway
    {   fn new(mut replies: Vec<Result<String, Error>>) -> Self
        {   replies.reverse();
            ScriptedGateway
            {   replies: Mutex::new(replies)
              , seen: Mutex::new(vec![])
            }
        }
    }

    impl CompletionGateway for ScriptedGateway
    {   async fn complete(&self, request: &CompletionRequest)
          -> crate::error::Result<CompletionResult>
        {   self.seen.lock().unwrap().push(request.user_prompt.clone());
            let next = self.replies.lock().unwrap().pop()
              .unwrap_or(Err(Error::Timeout));
            next.map(|raw_text| CompletionResult { raw_text })
        }

        async fn generate_image(&self, _prompt: &str)
          -> crate::error::Result<String>
        {   Err(Error::Timeout)
        }
    }

    fn canvas(tag: usize) -> String
    {   format!("```json\n{{\"version\": \"5.3.0\", \"tag\": {}}}\n```", tag)
    }

    #[tokio::test]
    async fn failures_become_placeholders_in_place()
    {   let variants = &CHANNEL_FORMATS[..6];
        let gateway = ScriptedGateway::new(vec![
          Ok(canvas(1)),
          Err(Error::Gateway { status: 502 }),
          Ok(canvas(3)),
          Ok(canvas(4)),
          Ok("Sorry, I can only describe the layout in words.".to_string()),
          Ok(canvas(6)),
        ]);

        let results = BatchOrchestrator::new(&gateway)
          .run(variants, |v| {
            CompletionRequest::new("sys", v.id, 0.7, "m")
          })
          .await;

        assert_eq!(results.len(), 6);
        for (i, (result, variant)) in results.iter().zip(variants).enumerate()
        {   assert_eq!(result.variant, *variant);
            match i
            {   1 | 4 => assert_eq!(result.canvas_data, synthesize(variant))
              , _ => assert_eq!(
                  result.canvas_data,
                  json!({ "version": "5.3.0", "tag": i + 1 })
                )
            }
        }
        let seen = gateway.seen.lock().unwrap().clone();
        assert_eq!(
          seen,
          variants.iter().map(|v| v.id.to_string()).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn every_call_failing_still_yields_full_batch()
    {   let variants = &CHANNEL_FORMATS[..3];
        let gateway = ScriptedGateway::new(vec![
          Err(Error::RateLimited),
          Err(Error::Configuration("missing key".to_string())),
          Err(Error::Http("connection reset".to_string())),
        ]);
        let results = BatchOrchestrator::new(&gateway)
          .run(variants, |_| CompletionRequest::new("s", "u", 0.7, "m"))
          .await;
        let placeholders: Vec<_> = variants.iter().map(synthesize).collect();
        let canvases: Vec<_> = results.into_iter().map(|r| r.canvas_data).collect();
        assert_eq!(canvases, placeholders);
    }

    #[tokio::test]
    async fn missing_credential_degrades_every_variant()
    {   let variants = &STYLE_VARIATIONS[..2];
        let gateway = ScriptedGateway::new(vec![
          Err(Error::Configuration("GATEWAY_API_KEY is not set".to_string())),
          Err(Error::Configuration("GATEWAY_API_KEY is not set".to_string())),
        ]);
        let results = BatchOrchestrator::new(&gateway)
          .run(variants, |_| CompletionRequest::new("s", "u", 0.8, "m"))
          .await;
        assert_eq!(results.len(), 2);
        for (result, variant) in results.iter().zip(variants)
        {   assert_eq!(result.canvas_data, synthesize(variant));
        }
    }

    #[tokio::test]
    async fn empty_input_makes_no_calls()
    {   let gateway = ScriptedGateway::new(vec![]);
        let results = BatchOrchestrator::new(&gateway)
          .run(&[], |_| CompletionRequest::new("s", "u", 0.7, "m"))
          .await;
        assert!(results.is_empty());
        assert!(gateway.seen.lock().unwrap().is_empty());
    }
}
