//! Typed feature requests and the wrappers returned to endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::catalogue::VariantDescriptor;
use crate::extract::ExtractedPayload;

/// Canvas-state documents are passed through untyped
pub type CanvasState = serde_json::Map<String, Value>;

/// Number of entries in a canvas state's `objects` list
pub fn object_count(state: &CanvasState) -> usize
{   state
      .get("objects")
      .and_then(Value::as_array)
      .map_or(0, Vec::len)
}

// ===== Requests =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasElement
{   #[serde(rename = "type")]
    pub kind: String
  , pub left: f64
  , pub top: f64
  , pub width: f64
  , pub height: f64
  , #[serde(default)]
    pub colors: Option<Vec<String>>
  , #[serde(default)]
    pub text: Option<String>
  , #[serde(default)]
    pub font_size: Option<f64>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionHeatmapRequest
{   pub elements: Vec<CanvasElement>
  , pub canvas_width: u32
  , pub canvas_height: u32
  , pub format: String
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDnaRequest
{   #[serde(default)]
    pub image_url: Option<String>
  , #[serde(default)]
    pub image_base64: Option<String>
  , #[serde(default)]
    pub brand_name: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSetRequest
{   #[serde(default)]
    pub canvas_state: CanvasState
  , pub campaign_name: String
  , pub product_description: String
  , #[serde(default)]
    pub selected_channels: Option<Vec<String>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasControlRequest
{   pub prompt: String
  , #[serde(default)]
    pub canvas_state: Option<CanvasState>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPsychologyRequest
{   pub target_emotion: String
  , pub industry: String
  , #[serde(default)]
    pub existing_colors: Option<Vec<String>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopywritingRequest
{   pub product_name: String
  , pub product_type: String
  , pub campaign_type: String
  , #[serde(default)]
    pub target_audience: Option<String>
  , #[serde(default)]
    pub tone: Option<String>
  , #[serde(default)]
    pub existing_copy: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeMultiverseRequest
{   #[serde(default)]
    pub canvas_state: CanvasState
  , pub product_description: String
  , #[serde(default)]
    pub selected_styles: Option<Vec<String>>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDesignRequest
{   pub emotion: String
  , /// Fraction in [0, 1]
    pub intensity: f64
  , #[serde(default)]
    pub context: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePredictionsRequest
{   pub canvas_analysis: CanvasState
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendForecastRequest
{   pub industry: String
  , pub platform: String
  , #[serde(default)]
    pub target_audience: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyHarmonyRequest
{   pub brand_style: String
  , #[serde(default)]
    pub current_heading_font: Option<String>
  , #[serde(default)]
    pub current_body_font: Option<String>
  , #[serde(default)]
    pub context: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualAuditorRequest
{   #[serde(default)]
    pub canvas_state: CanvasState
  , #[serde(default)]
    pub image_base64: Option<String>
  , #[serde(default)]
    pub design_goal: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBackgroundRequest
{   pub prompt: String
  , #[serde(default)]
    pub product_context: Option<String>
}

/// Any feature request, tagged by feature name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "feature", content = "input", rename_all = "kebab-case")]
pub enum FeatureRequest
{   AttentionHeatmap(AttentionHeatmapRequest)
  , BrandDna(BrandDnaRequest)
  , CampaignSet(CampaignSetRequest)
  , CanvasControl(CanvasControlRequest)
  , ColorPsychology(ColorPsychologyRequest)
  , Copywriting(CopywritingRequest)
  , CreativeMultiverse(CreativeMultiverseRequest)
  , EmotionDesign(EmotionDesignRequest)
  , PerformancePredictions(PerformancePredictionsRequest)
  , TrendForecast(TrendForecastRequest)
  , TypographyHarmony(TypographyHarmonyRequest)
  , VisualAuditor(VisualAuditorRequest)
  , GenerateBackground(GenerateBackgroundRequest)
}

// ===== Responses =====

/// One generated (or substituted) variant of a batch feature
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationResult
{   #[serde(flatten)]
    pub variant: VariantDescriptor
  , pub canvas_data: ExtractedPayload
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandKit
{   pub primary_color: String
  , pub secondary_color: String
  , pub accent_color: String
  , pub font_heading: String
  , pub font_body: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDnaResponse
{   #[serde(rename = "brandDNA")]
    pub brand_dna: Value
  , pub brand_kit: BrandKit
  , pub message: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPsychologyResponse
{   pub color_analysis: ExtractedPayload
  , pub target_emotion: String
  , pub industry: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionDesignResponse
{   pub design_params: ExtractedPayload
  , pub emotion: String
  , pub intensity: f64
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyHarmonyResponse
{   pub suggestions: Value
  , pub current_analysis: Value
  , pub categories: Value
  , pub message: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundResponse
{   pub image_url: String
  , pub message: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSetResponse
{   pub campaign_name: String
  , pub hero_creative: Option<VariationResult>
  , pub variations: Vec<VariationResult>
  , pub all_channels: Vec<VariantDescriptor>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeMultiverseResponse
{   pub variations: Vec<VariationResult>
  , pub all_styles: Vec<VariantDescriptor>
  , pub message: String
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn tagged_request_round_trips_camel_case()
    {   let request: FeatureRequest = serde_json::from_value(json!({
          "feature": "color-psychology",
          "input": {
            "targetEmotion": "trust",
            "industry": "fintech",
            "existingColors": ["#0044ff"]
          }
        })).unwrap();
        match request
        {   FeatureRequest::ColorPsychology(inner) => {
              assert_eq!(inner.target_emotion, "trust");
              assert_eq!(inner.existing_colors, Some(vec!["#0044ff".to_string()]));
            }
          , other => panic!("unexpected request: {:?}", other)
        }
    }

    #[test]
    fn canvas_element_type_field()
    {   let element: CanvasElement = serde_json::from_value(json!({
          "type": "textbox", "left": 10, "top": 20,
          "width": 100, "height": 50, "fontSize": 32
        })).unwrap();
        assert_eq!(element.kind, "textbox");
        assert_eq!(element.font_size, Some(32.0));
        assert!(element.text.is_none());
    }

    #[test]
    fn variation_result_is_flat()
    {   let result = VariationResult
        {   variant: crate::catalogue::CHANNEL_FORMATS[0]
          , canvas_data: json!({ "objects": [] })
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["id"], "instagram-feed");
        assert_eq!(value["name"], "Instagram Feed");
        assert_eq!(value["height"], 1080);
        assert_eq!(value["canvasData"], json!({ "objects": [] }));
    }

    #[test]
    fn objects_are_counted()
    {   let state: CanvasState = serde_json::from_value(
          json!({ "objects": [{}, {}, {}] })
        ).unwrap();
        assert_eq!(object_count(&state), 3);
        assert_eq!(object_count(&CanvasState::new()), 0);
    }
}
