//! Feature facade: typed request in, typed response out
//!
//! Single-call features propagate every gateway or parse failure to the
//! caller. Batch features (campaign set, creative multiverse) only fail on
//! an invalid variant selection; per-variant failures are absorbed by the
//! [`BatchOrchestrator`].

use log::{debug, info};
use serde::Serialize;
use serde_json::Value;
use crate::batch::BatchOrchestrator;
use crate::catalogue::{self, CHANNEL_FORMATS, STYLE_VARIATIONS};
use crate::error::{Error, Result};
use crate::extract::{extract, ExtractedPayload};
use crate::gateway::CompletionGateway;
use crate::prompts::{background_prompt, PromptInput};
use crate::request::CompletionRequest;
use crate::schema::*;

const DEFAULT_PRIMARY_COLOR: &str = "#22C55E";
const DEFAULT_SECONDARY_COLOR: &str = "#38BDF8";
const DEFAULT_ACCENT_COLOR: &str = "#F59E0B";
const DEFAULT_FONT: &str = "Inter";

/// Runs features against an injected gateway
#[derive(Debug, Clone)]
pub struct Studio<G>
{   gateway: G
  , chat_model: String
}

impl<G> Studio<G>
where
  G: CompletionGateway
{   pub fn new(gateway: G, chat_model: impl Into<String>) -> Self
    {   Studio
        {   gateway
          , chat_model: chat_model.into()
        }
    }

    pub fn gateway(&self) -> &G
    {   &self.gateway
    }

    /// Prompt, complete and extract for one single-call feature
    async fn single(&self, input: PromptInput<'_>)
      -> Result<ExtractedPayload>
    {   let feature = input.feature();
        debug!("Running {:?}", feature);
        let request = CompletionRequest::from_prompt(
            input.build()
          , self.chat_model.as_str()
          );
        let completion = self.gateway.complete(&request).await?;
        let payload = extract(&completion.raw_text)?;
        info!("{:?} completed", feature);
        Ok(payload)
    }

    pub async fn attention_heatmap(
      &self
    , request: &AttentionHeatmapRequest
    ) -> Result<ExtractedPayload>
    {   self.single(PromptInput::AttentionHeatmap(request)).await
    }

    pub async fn brand_dna(&self, request: &BrandDnaRequest)
      -> Result<BrandDnaResponse>
    {   if request.image_url.is_none() && request.image_base64.is_none()
        {   return Err(Error::InvalidRequest(
              "Either imageUrl or imageBase64 is required".to_string()
            ));
        }
        let payload = self.single(PromptInput::BrandDna(request)).await?;
        Ok(BrandDnaResponse
        {   brand_dna: payload
              .get("brandDNA")
              .cloned()
              .unwrap_or_else(|| Value::Object(Default::default()))
          , brand_kit: brand_kit_from(&payload)
          , message: "Brand DNA extracted successfully".to_string()
        })
    }

    pub async fn color_psychology(
      &self
    , request: &ColorPsychologyRequest
    ) -> Result<ColorPsychologyResponse>
    {   let color_analysis
          = self.single(PromptInput::ColorPsychology(request)).await?;
        Ok(ColorPsychologyResponse
        {   color_analysis
          , target_emotion: request.target_emotion.clone()
          , industry: request.industry.clone()
        })
    }

    pub async fn copywriting(&self, request: &CopywritingRequest)
      -> Result<ExtractedPayload>
    {   self.single(PromptInput::Copywriting(request)).await
    }

    pub async fn canvas_control(&self, request: &CanvasControlRequest)
      -> Result<ExtractedPayload>
    {   if request.prompt.trim().is_empty()
        {   return Err(Error::InvalidRequest(
              "Prompt is required".to_string()
            ));
        }
        self.single(PromptInput::CanvasControl(request)).await
    }

    pub async fn emotion_design(&self, request: &EmotionDesignRequest)
      -> Result<EmotionDesignResponse>
    {   let design_params
          = self.single(PromptInput::EmotionDesign(request)).await?;
        Ok(EmotionDesignResponse
        {   design_params
          , emotion: request.emotion.clone()
          , intensity: request.intensity
        })
    }

    pub async fn performance_predictions(
      &self
    , request: &PerformancePredictionsRequest
    ) -> Result<ExtractedPayload>
    {   self.single(PromptInput::PerformancePredictions(request)).await
    }

    pub async fn trend_forecast(&self, request: &TrendForecastRequest)
      -> Result<ExtractedPayload>
    {   self.single(PromptInput::TrendForecast(request)).await
    }

    pub async fn typography_harmony(
      &self
    , request: &TypographyHarmonyRequest
    ) -> Result<TypographyHarmonyResponse>
    {   let payload
          = self.single(PromptInput::TypographyHarmony(request)).await?;
        let field = |name: &str, empty: Value| {
          payload.get(name).cloned().unwrap_or(empty)
        };
        Ok(TypographyHarmonyResponse
        {   suggestions: field("suggestions", Value::Array(vec![]))
          , current_analysis: field(
              "currentAnalysis",
              Value::Object(Default::default())
            )
          , categories: field("categories", Value::Object(Default::default()))
          , message: "Typography suggestions generated successfully"
              .to_string()
        })
    }

    pub async fn visual_auditor(&self, request: &VisualAuditorRequest)
      -> Result<ExtractedPayload>
    {   self.single(PromptInput::VisualAuditor(request)).await
    }

    pub async fn generate_background(
      &self
    , request: &GenerateBackgroundRequest
    ) -> Result<BackgroundResponse>
    {   if request.prompt.trim().is_empty()
        {   return Err(Error::InvalidRequest(
              "Prompt is required".to_string()
            ));
        }
        let image_url = self.gateway
          .generate_image(&background_prompt(request))
          .await?;
        Ok(BackgroundResponse
        {   image_url
          , message: "Background generated successfully".to_string()
        })
    }

    /// One canvas per channel; the first becomes the hero creative
    pub async fn campaign_set(&self, request: &CampaignSetRequest)
      -> Result<CampaignSetResponse>
    {   let channels = catalogue::select_channels(
          request.selected_channels.as_deref()
        )?;
        let mut results = BatchOrchestrator::new(&self.gateway)
          .run(&channels, |channel| {
            CompletionRequest::from_prompt(
                PromptInput::CampaignSet(request, channel).build()
              , self.chat_model.as_str()
              )
          })
          .await
          .into_iter();

        let hero_creative = results.next();
        Ok(CampaignSetResponse
        {   campaign_name: request.campaign_name.clone()
          , hero_creative
          , variations: results.collect()
          , all_channels: CHANNEL_FORMATS.to_vec()
        })
    }

    /// One canvas per design style
    pub async fn creative_multiverse(
      &self
    , request: &CreativeMultiverseRequest
    ) -> Result<CreativeMultiverseResponse>
    {   let styles = catalogue::select_styles(
          request.selected_styles.as_deref()
        )?;
        let variations = BatchOrchestrator::new(&self.gateway)
          .run(&styles, |style| {
            CompletionRequest::from_prompt(
                PromptInput::CreativeMultiverse(request, style).build()
              , self.chat_model.as_str()
              )
          })
          .await;

        Ok(CreativeMultiverseResponse
        {   variations
          , all_styles: STYLE_VARIATIONS.to_vec()
          , message: "Creative variations generated successfully"
              .to_string()
        })
    }

    /// Dispatch any feature request and serialize its response
    pub async fn run(&self, request: &FeatureRequest) -> Result<Value>
    {   match request
        {   FeatureRequest::AttentionHeatmap(r) => {
              self.attention_heatmap(r).await
            }
          , FeatureRequest::BrandDna(r) => {
              to_json(self.brand_dna(r).await?)
            }
          , FeatureRequest::CampaignSet(r) => {
              to_json(self.campaign_set(r).await?)
            }
          , FeatureRequest::CanvasControl(r) => {
              self.canvas_control(r).await
            }
          , FeatureRequest::ColorPsychology(r) => {
              to_json(self.color_psychology(r).await?)
            }
          , FeatureRequest::Copywriting(r) => self.copywriting(r).await
          , FeatureRequest::CreativeMultiverse(r) => {
              to_json(self.creative_multiverse(r).await?)
            }
          , FeatureRequest::EmotionDesign(r) => {
              to_json(self.emotion_design(r).await?)
            }
          , FeatureRequest::PerformancePredictions(r) => {
              self.performance_predictions(r).await
            }
          , FeatureRequest::TrendForecast(r) => {
              self.trend_forecast(r).await
            }
          , FeatureRequest::TypographyHarmony(r) => {
              to_json(self.typography_harmony(r).await?)
            }
          , FeatureRequest::VisualAuditor(r) => {
              self.visual_auditor(r).await
            }
          , FeatureRequest::GenerateBackground(r) => {
              to_json(self.generate_background(r).await?)
            }
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value>
{   serde_json::to_value(value)
      .map_err(|e| Error::Serialization(e.to_string()))
}

/// Brand kit from extracted colors and fonts, with house defaults
fn brand_kit_from(payload: &Value) -> BrandKit
{   let pick = |section: &str, key: &str, default: &str| {
      payload
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
    };
    BrandKit
    {   primary_color: pick("extractedColors", "primary", DEFAULT_PRIMARY_COLOR)
      , secondary_color: pick(
          "extractedColors", "secondary", DEFAULT_SECONDARY_COLOR
        )
      , accent_color: pick("extractedColors", "accent", DEFAULT_ACCENT_COLOR)
      , font_heading: pick("suggestedFonts", "heading", DEFAULT_FONT)
      , font_body: pick("suggestedFonts", "body", DEFAULT_FONT)
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn brand_kit_defaults_fill_gaps()
    {   let payload = json!({
          "extractedColors": { "primary": "#101010", "accent": 7 },
          "suggestedFonts": { "body": "Lora" }
        });
        let kit = brand_kit_from(&payload);
        assert_eq!(kit.primary_color, "#101010");
        assert_eq!(kit.secondary_color, DEFAULT_SECONDARY_COLOR);
        assert_eq!(kit.accent_color, DEFAULT_ACCENT_COLOR);
        assert_eq!(kit.font_heading, "Inter");
        assert_eq!(kit.font_body, "Lora");
    }

    #[test]
    fn unrenderable_result_is_a_serialization_error()
    {   let mut tiles = std::collections::BTreeMap::new();
        tiles.insert((0, 1), "hero");
        let err = to_json(tiles).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
        assert_eq!(err.kind(), "serialization");
    }
}
