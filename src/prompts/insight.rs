//! Analytical features: attention, performance, trends, audits

use serde_json::Value;
use crate::schema::{
  object_count, AttentionHeatmapRequest, CanvasElement,
  PerformancePredictionsRequest, TrendForecastRequest, VisualAuditorRequest,
};
use super::optional_line;

const HEATMAP_SYSTEM: &str = r#"You are an eye-tracking prediction AI that simulates viewer gaze patterns for advertisements.

Based on the canvas elements provided, predict attention hotspots. Consider:
1. F-pattern and Z-pattern reading behavior
2. Faces and eyes attract immediate attention
3. High-contrast areas draw focus
4. Text (especially headlines) gets early attention
5. CTAs and buttons are natural endpoints
6. Motion/implied motion in images
7. Rule of thirds placement
8. Logo placement patterns

Return a JSON object of attention zones with intensity (0-100):
{
  "zones": [
    { "x": number, "y": number, "radius": number, "intensity": number, "label": string, "order": number }
  ],
  "gazeOrder": ["element1", "element2", ...],
  "summary": "Brief description of expected viewing pattern"
}

Coordinates should be in percentage (0-100) relative to canvas size."#;

const PERFORMANCE_SYSTEM: &str = r#"You are an advertising performance analyst. Predict engagement metrics based on creative analysis.

Return JSON:
{
  "predictions": {
    "ctr": { "value": 0.0, "range": [min, max], "confidence": 0-100 },
    "engagement": { "value": 0.0, "range": [min, max], "confidence": 0-100 },
    "conversion": { "value": 0.0, "range": [min, max], "confidence": 0-100 },
    "recall": { "value": 0.0, "range": [min, max], "confidence": 0-100 }
  },
  "benchmarks": {
    "industry": "industry name",
    "averageCtr": 0.0,
    "topPerformerCtr": 0.0
  },
  "strengths": ["strength1", "strength2"],
  "weaknesses": ["weakness1", "weakness2"],
  "recommendations": ["recommendation1", "recommendation2"],
  "overallScore": 0-100
}"#;

const TREND_SYSTEM: &str = r#"You are a creative trends analyst. Provide trend forecasts for advertising and design.

Return JSON:
{
  "currentTrends": [
    { "name": "trend name", "description": "description", "momentum": "rising|stable|declining", "adoptionRate": 0-100 }
  ],
  "emergingTrends": [
    { "name": "trend name", "description": "description", "timeToMainstream": "months", "potentialImpact": "high|medium|low" }
  ],
  "decliningTrends": [
    { "name": "trend name", "description": "description", "recommendation": "action to take" }
  ],
  "recommendations": [
    { "action": "what to do", "priority": "high|medium|low", "impact": "expected impact" }
  ],
  "industryInsights": "overall industry observations"
}"#;

const AUDITOR_SYSTEM: &str = r#"You are an expert visual design auditor. Analyze designs and provide constructive feedback.

Return JSON:
{
  "overallScore": 0-100,
  "categories": {
    "composition": { "score": 0-100, "feedback": "description", "suggestions": ["suggestion1"] },
    "colorHarmony": { "score": 0-100, "feedback": "description", "suggestions": ["suggestion1"] },
    "typography": { "score": 0-100, "feedback": "description", "suggestions": ["suggestion1"] },
    "hierarchy": { "score": 0-100, "feedback": "description", "suggestions": ["suggestion1"] },
    "brandConsistency": { "score": 0-100, "feedback": "description", "suggestions": ["suggestion1"] },
    "accessibility": { "score": 0-100, "feedback": "description", "suggestions": ["suggestion1"] }
  },
  "strengths": ["strength1", "strength2"],
  "priorityFixes": [
    { "issue": "what's wrong", "fix": "how to fix", "impact": "high|medium|low" }
  ],
  "summary": "overall assessment"
}"#;

/// Longest text excerpt quoted per element
const ELEMENT_TEXT_LIMIT: usize = 30;

/// Element centre as a percentage of the canvas
pub(crate) fn center_percent(
  element: &CanvasElement
, canvas_width: u32
, canvas_height: u32
) -> (f64, f64)
{   let percent = |offset: f64, extent: f64, total: u32| {
      if total == 0
      {   0.0
      } else
      {   (offset + extent / 2.0) / f64::from(total) * 100.0
      }
    };
    (
      percent(element.left, element.width, canvas_width)
    , percent(element.top, element.height, canvas_height)
    )
}

fn describe_element(
  index: usize
, element: &CanvasElement
, request: &AttentionHeatmapRequest
) -> String
{   let (x, y) = center_percent(
        element
      , request.canvas_width
      , request.canvas_height
      );
    let text_info = element
      .text
      .as_deref()
      .filter(|t| !t.is_empty())
      .map(|t| {
        let excerpt: String = t.chars().take(ELEMENT_TEXT_LIMIT).collect();
        format!(" (\"{}\")", excerpt)
      })
      .unwrap_or_default();
    format!(
      "{}. {}{}: center at {:.1}%x, {:.1}%y, size {}x{}px",
      index + 1,
      element.kind,
      text_info,
      x,
      y,
      element.width,
      element.height
    )
}

pub(crate) fn attention_heatmap(request: &AttentionHeatmapRequest)
  -> (String, String)
{   let elements: Vec<String> = request
      .elements
      .iter()
      .enumerate()
      .map(|(i, el)| describe_element(i, el, request))
      .collect();

    let user = format!(
      "Analyze this {} creative ({}x{}px) and predict viewer attention patterns:\n\n\
       Elements on canvas:\n{}\n\n\
       Generate attention hotspots predicting where viewers will look first, second, etc.",
      request.format,
      request.canvas_width,
      request.canvas_height,
      elements.join("\n")
    );
    (HEATMAP_SYSTEM.to_string(), user)
}

/// Render an analysis field; strings unquoted, other JSON as text
fn analysis_field(value: Option<&Value>, default: &str) -> String
{   match value
    {   None | Some(Value::Null) => default.to_string()
      , Some(Value::String(s)) => s.clone()
      , Some(other) => other.to_string()
    }
}

pub(crate) fn performance_predictions(
  request: &PerformancePredictionsRequest
) -> (String, String)
{   let analysis = &request.canvas_analysis;
    let element_count = analysis
      .get("elements")
      .and_then(Value::as_array)
      .map_or(0, Vec::len);

    let user = format!(
      "Predict performance for this creative:\n\
       Format: {}\n\
       Elements: {} objects\n\
       Colors: {}\n\
       Text content: {}\n\n\
       Provide performance predictions and recommendations.",
      analysis_field(analysis.get("format"), "Unknown"),
      element_count,
      analysis_field(analysis.get("colorAnalysis"), "Not analyzed"),
      analysis_field(analysis.get("textContent"), "None")
    );
    (PERFORMANCE_SYSTEM.to_string(), user)
}

pub(crate) fn trend_forecast(request: &TrendForecastRequest)
  -> (String, String)
{   let user = format!(
      "Provide trend forecasts for:\n\
       Industry: {}\n\
       Platform: {}{}\n\n\
       Analyze current and emerging creative trends.",
      request.industry,
      request.platform,
      optional_line("Target Audience", request.target_audience.as_deref())
    );
    (TREND_SYSTEM.to_string(), user)
}

pub(crate) fn visual_auditor(request: &VisualAuditorRequest)
  -> (String, String)
{   let canvas_info = if request.canvas_state.is_empty()
    {   String::new()
    } else
    {   format!(
          "\nCanvas has {} objects",
          object_count(&request.canvas_state)
        )
    };

    let user = format!(
      "Audit this design:{}{}\n\n\
       Provide comprehensive design feedback and improvement suggestions.",
      canvas_info,
      optional_line("Design Goal", request.design_goal.as_deref())
    );
    (AUDITOR_SYSTEM.to_string(), user)
}
