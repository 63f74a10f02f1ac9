//! Generative features: copy, canvas commands, layouts and backgrounds

use crate::catalogue::{VariantDescriptor, VariantKind};
use crate::fallback::CANVAS_VERSION;
use crate::schema::{
  object_count, CampaignSetRequest, CanvasControlRequest, CopywritingRequest,
  CreativeMultiverseRequest, GenerateBackgroundRequest,
};
use super::optional_line;

const COPYWRITING_SYSTEM: &str = r#"You are an expert advertising copywriter specializing in digital and retail marketing.

Generate compelling, conversion-focused copy variations. Consider:
- AIDA framework (Attention, Interest, Desire, Action)
- Power words and emotional triggers
- Urgency without being pushy
- Clear value propositions
- Platform-specific character limits
- Brand voice consistency

Return exactly 25-30 variations in this JSON format:
{
  "headlines": [
    { "text": "string", "charCount": number, "style": "bold|minimal|emotional|urgent|playful" }
  ],
  "ctas": [
    { "text": "string", "charCount": number, "style": "direct|soft|urgent|benefit|discovery" }
  ],
  "taglines": [
    { "text": "string", "charCount": number }
  ]
}

Headlines: 10 variations (under 50 chars each)
CTAs: 10 variations (under 20 chars each)
Taglines: 10 variations (under 80 chars each)"#;

const CANVAS_CONTROL_SYSTEM: &str = r#"You are an AI assistant that controls a fabric.js canvas. Parse natural language commands and return structured actions.

Available actions:
- add_text: Add text element {text, fontSize, color, position}
- add_shape: Add shape {type: rect|circle|triangle, fill, position, size}
- add_image: Add image {url, position, size}
- modify: Modify element {selector, properties}
- delete: Delete element {selector}
- arrange: Arrange elements {action: align|distribute, direction}
- style: Apply style {selector, styles}

Return JSON:
{
  "message": "Friendly response describing what you're doing",
  "commands": [
    { "action": "action_name", "targets": ["element_ids"], "params": {} }
  ]
}"#;

const DEFAULT_AUDIENCE: &str = "General consumers";
const DEFAULT_TONE: &str = "Professional yet approachable";

pub(crate) fn copywriting(request: &CopywritingRequest) -> (String, String)
{   let existing_copy = request
      .existing_copy
      .as_deref()
      .filter(|c| !c.trim().is_empty())
      .map(|c| format!("\nCurrent Copy: \"{}\"", c))
      .unwrap_or_default();
    let audience = request
      .target_audience
      .as_deref()
      .filter(|a| !a.trim().is_empty())
      .unwrap_or(DEFAULT_AUDIENCE);
    let tone = request
      .tone
      .as_deref()
      .filter(|t| !t.trim().is_empty())
      .unwrap_or(DEFAULT_TONE);

    let user = format!(
      "Generate copy variations for:\n\n\
       Product: {}\n\
       Product Type: {}\n\
       Campaign: {}\n\
       Target Audience: {}\n\
       Tone: {}{}\n\n\
       Create compelling, diverse variations that could work across Instagram, Facebook, and retail displays.",
      request.product_name,
      request.product_type,
      request.campaign_type,
      audience,
      tone,
      existing_copy
    );
    (COPYWRITING_SYSTEM.to_string(), user)
}

pub(crate) fn canvas_control(request: &CanvasControlRequest)
  -> (String, String)
{   let canvas_state = request
      .canvas_state
      .as_ref()
      .filter(|state| !state.is_empty())
      .map(|state| {
        format!("\n\nCurrent canvas has {} objects.", object_count(state))
      })
      .unwrap_or_default();

    let user = format!(
      "User command: {}{}\n\n\
       Parse this command and return the appropriate canvas actions.",
      request.prompt,
      canvas_state
    );
    (CANVAS_CONTROL_SYSTEM.to_string(), user)
}

/// Layout for one ad channel of a campaign
pub(crate) fn campaign_variant(
  request: &CampaignSetRequest
, channel: &VariantDescriptor
) -> (String, String)
{   let (width, height) = channel.dimensions();
    let system = format!(
      "You are an expert creative designer. Generate a fabric.js compatible JSON canvas layout for a {} ({}x{}px) advertisement.\n\n\
       Return only valid JSON that can be loaded into fabric.js with version \"{}\".\n\
       Include objects like rect, text, and image placeholders with proper positioning.",
      channel.name, width, height, CANVAS_VERSION
    );
    let user = format!(
      "Create a {} creative for:\n\
       Campaign: {}\n\
       Product: {}\n\
       Canvas size: {}x{}px\n\n\
       Generate a professional advertising layout.",
      channel.name,
      request.campaign_name,
      request.product_description,
      width,
      height
    );
    (system, user)
}

/// Layout for one design style of the multiverse
pub(crate) fn style_variant(
  request: &CreativeMultiverseRequest
, style: &VariantDescriptor
) -> (String, String)
{   let description = match style.kind
    {   VariantKind::Style { description } => description
      , VariantKind::Channel { platform, .. } => platform
    };
    let (width, height) = style.dimensions();
    let system = format!(
      "You are an expert creative designer. Generate a fabric.js compatible JSON canvas layout in the \"{}\" style.\n\n\
       Style description: {}\n\n\
       Return only valid JSON that can be loaded into fabric.js with version \"{}\".",
      style.name, description, CANVAS_VERSION
    );
    let user = format!(
      "Create a creative design for:\n\
       Product: {}\n\
       Style: {} - {}\n\
       Canvas size: {}x{}px\n\n\
       Generate a professional advertising layout in this exact style.",
      request.product_description,
      style.name,
      description,
      width,
      height
    );
    (system, user)
}

/// Image prompt for background generation; sent user-only, no temperature
pub fn background_prompt(request: &GenerateBackgroundRequest) -> String
{   format!(
      "Professional product photography background: {}\n\n\
       Requirements:\n\
       - Clean, minimalist background suitable for product placement\n\
       - High resolution, commercial quality\n\
       - Soft, even lighting\n\
       - No text or watermarks\n\
       - Subtle gradients or textures only{}",
      request.prompt.trim(),
      optional_line("Product context", request.product_context.as_deref())
    )
}
