//! Prompt construction for every structured-generation feature
//!
//! Each feature is a tag in [`Feature`] carrying its temperature; the
//! field interpolation lives in the submodules, grouped by what the
//! feature produces. Builders are pure: they never call the gateway and
//! never look at model output.

use serde::{Deserialize, Serialize};
use crate::catalogue::VariantDescriptor;
use crate::schema;

mod compose;
mod identity;
mod insight;

pub use compose::background_prompt;

/// System prompt, user prompt and sampling temperature for one call
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSpec
{   pub system: String
  , pub user: String
  , pub temperature: f32
}

/// Closed set of chat-completion features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature
{   AttentionHeatmap
  , BrandDna
  , CampaignSet
  , CanvasControl
  , ColorPsychology
  , Copywriting
  , CreativeMultiverse
  , EmotionDesign
  , PerformancePredictions
  , TrendForecast
  , TypographyHarmony
  , VisualAuditor
}

impl Feature
{   pub const ALL: [Feature; 12] = [
      Feature::AttentionHeatmap
    , Feature::BrandDna
    , Feature::CampaignSet
    , Feature::CanvasControl
    , Feature::ColorPsychology
    , Feature::Copywriting
    , Feature::CreativeMultiverse
    , Feature::EmotionDesign
    , Feature::PerformancePredictions
    , Feature::TrendForecast
    , Feature::TypographyHarmony
    , Feature::VisualAuditor
    ];

    /// Low for analytical features, high for generative ones
    pub fn temperature(self) -> f32
    {   match self
        {   Feature::AttentionHeatmap => 0.2
          , Feature::BrandDna
          | Feature::CanvasControl
          | Feature::PerformancePredictions
          | Feature::VisualAuditor => 0.3
          , Feature::ColorPsychology
          | Feature::TypographyHarmony => 0.4
          , Feature::EmotionDesign
          | Feature::TrendForecast => 0.5
          , Feature::CampaignSet => 0.7
          , Feature::Copywriting
          | Feature::CreativeMultiverse => 0.8
        }
    }

    /// Whether the feature fans out into one call per variant
    pub fn is_batch(self) -> bool
    {   matches!(self, Feature::CampaignSet | Feature::CreativeMultiverse)
    }
}

/// A typed request paired with its feature tag
#[derive(Debug, Clone, Copy)]
pub enum PromptInput<'a>
{   AttentionHeatmap(&'a schema::AttentionHeatmapRequest)
  , BrandDna(&'a schema::BrandDnaRequest)
  , CampaignSet(&'a schema::CampaignSetRequest, &'a VariantDescriptor)
  , CanvasControl(&'a schema::CanvasControlRequest)
  , ColorPsychology(&'a schema::ColorPsychologyRequest)
  , Copywriting(&'a schema::CopywritingRequest)
  , CreativeMultiverse(&'a schema::CreativeMultiverseRequest, &'a VariantDescriptor)
  , EmotionDesign(&'a schema::EmotionDesignRequest)
  , PerformancePredictions(&'a schema::PerformancePredictionsRequest)
  , TrendForecast(&'a schema::TrendForecastRequest)
  , TypographyHarmony(&'a schema::TypographyHarmonyRequest)
  , VisualAuditor(&'a schema::VisualAuditorRequest)
}

impl PromptInput<'_>
{   pub fn feature(&self) -> Feature
    {   match self
        {   PromptInput::AttentionHeatmap(_) => Feature::AttentionHeatmap
          , PromptInput::BrandDna(_) => Feature::BrandDna
          , PromptInput::CampaignSet(..) => Feature::CampaignSet
          , PromptInput::CanvasControl(_) => Feature::CanvasControl
          , PromptInput::ColorPsychology(_) => Feature::ColorPsychology
          , PromptInput::Copywriting(_) => Feature::Copywriting
          , PromptInput::CreativeMultiverse(..) => Feature::CreativeMultiverse
          , PromptInput::EmotionDesign(_) => Feature::EmotionDesign
          , PromptInput::PerformancePredictions(_) => {
              Feature::PerformancePredictions
            }
          , PromptInput::TrendForecast(_) => Feature::TrendForecast
          , PromptInput::TypographyHarmony(_) => Feature::TypographyHarmony
          , PromptInput::VisualAuditor(_) => Feature::VisualAuditor
        }
    }

    /// Build the prompt triple
    pub fn build(&self) -> PromptSpec
    {   let (system, user) = match *self
        {   PromptInput::AttentionHeatmap(r) => insight::attention_heatmap(r)
          , PromptInput::BrandDna(r) => identity::brand_dna(r)
          , PromptInput::CampaignSet(r, v) => compose::campaign_variant(r, v)
          , PromptInput::CanvasControl(r) => compose::canvas_control(r)
          , PromptInput::ColorPsychology(r) => identity::color_psychology(r)
          , PromptInput::Copywriting(r) => compose::copywriting(r)
          , PromptInput::CreativeMultiverse(r, v) => {
              compose::style_variant(r, v)
            }
          , PromptInput::EmotionDesign(r) => identity::emotion_design(r)
          , PromptInput::PerformancePredictions(r) => {
              insight::performance_predictions(r)
            }
          , PromptInput::TrendForecast(r) => insight::trend_forecast(r)
          , PromptInput::TypographyHarmony(r) => {
              identity::typography_harmony(r)
            }
          , PromptInput::VisualAuditor(r) => insight::visual_auditor(r)
        };
        PromptSpec
        {   system
          , user
          , temperature: self.feature().temperature()
        }
    }
}

/// `"\n{label}: {value}"` when the value is present and non-blank
pub(crate) fn optional_line(label: &str, value: Option<&str>) -> String
{   match value.map(str::trim).filter(|v| !v.is_empty())
    {   Some(v) => format!("\n{}: {}", label, v)
      , None => String::new()
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn analytical_features_run_cold()
    {   for feature in Feature::ALL
        {   let t = feature.temperature();
            assert!((0.0..=2.0).contains(&t));
            if matches!(
              feature,
              Feature::VisualAuditor
                | Feature::PerformancePredictions
                | Feature::AttentionHeatmap
            )
            {   assert!(t <= 0.3, "{:?} too warm", feature);
            }
        }
        assert!(Feature::Copywriting.temperature() >= 0.7);
        assert!(Feature::CreativeMultiverse.temperature() >= 0.7);
    }

    #[test]
    fn only_two_batch_features()
    {   let batch: Vec<Feature> = Feature::ALL
          .into_iter()
          .filter(|f| f.is_batch())
          .collect();
        assert_eq!(batch, vec![Feature::CampaignSet, Feature::CreativeMultiverse]);
    }

    #[test]
    fn optional_line_skips_blank()
    {   assert_eq!(optional_line("Context", Some("launch")), "\nContext: launch");
        assert_eq!(optional_line("Context", Some("  ")), "");
        assert_eq!(optional_line("Context", None), "");
    }
}
