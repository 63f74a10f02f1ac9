//! Brand identity features: brand DNA, color, typography, emotion

use crate::schema::{
  BrandDnaRequest, ColorPsychologyRequest, EmotionDesignRequest,
  TypographyHarmonyRequest,
};
use super::optional_line;

const BRAND_DNA_SYSTEM: &str = r##"You are an expert brand analyst specializing in visual identity extraction.

Analyze the provided product or brand image and extract detailed brand DNA. Return a JSON object with:
{
  "brandDNA": {
    "personality": ["trait1", "trait2", "trait3"],
    "values": ["value1", "value2", "value3"],
    "tone": "description of brand voice/tone",
    "visualStyle": "description of visual aesthetic",
    "targetAudience": "description of ideal customer",
    "industryCategory": "industry or category",
    "colorMood": "emotional association of colors",
    "typography": "suggested typography style"
  },
  "extractedColors": {
    "primary": "#hexcolor",
    "secondary": "#hexcolor",
    "accent": "#hexcolor",
    "background": "#hexcolor",
    "text": "#hexcolor"
  },
  "suggestedFonts": {
    "heading": "font name",
    "body": "font name"
  }
}"##;

const COLOR_SYSTEM: &str = r##"You are an expert in color psychology and marketing. Analyze emotions and provide color recommendations.

Return JSON:
{
  "primaryRecommendations": [
    { "color": "#hex", "name": "Color Name", "emotion": "primary emotion", "strength": 0-100 }
  ],
  "complementaryPalette": ["#hex1", "#hex2", "#hex3", "#hex4", "#hex5"],
  "psychologyInsights": {
    "primaryEmotion": "description",
    "secondaryEmotions": ["emotion1", "emotion2"],
    "culturalConsiderations": "notes on cultural meanings",
    "industryFit": "how colors fit the industry"
  },
  "usageGuidelines": {
    "backgrounds": "recommendation",
    "text": "recommendation",
    "accents": "recommendation",
    "ctaButtons": "recommendation"
  }
}"##;

const TYPOGRAPHY_SYSTEM: &str = r#"You are a typography expert. Suggest font pairings that create visual harmony.

Return JSON:
{
  "suggestions": [
    {
      "heading": "font name",
      "body": "font name",
      "compatibility": 0-100,
      "mood": "description",
      "useCase": "best for..."
    }
  ],
  "currentAnalysis": {
    "headingStyle": "classification",
    "bodyStyle": "classification",
    "harmonyScore": 0-100,
    "improvements": ["suggestion1", "suggestion2"]
  },
  "categories": {
    "modern": [{ "heading": "font", "body": "font" }],
    "elegant": [{ "heading": "font", "body": "font" }],
    "creative": [{ "heading": "font", "body": "font" }],
    "minimal": [{ "heading": "font", "body": "font" }]
  }
}"#;

const EMOTION_SYSTEM: &str = r##"You are an expert in emotional design and visual psychology. Translate emotions into visual design parameters.

Return JSON:
{
  "colors": {
    "primary": "#hex",
    "secondary": "#hex",
    "accent": "#hex",
    "background": "#hex",
    "text": "#hex"
  },
  "typography": {
    "headingFont": "font name",
    "bodyFont": "font name",
    "headingWeight": "bold|normal|light",
    "letterSpacing": "tight|normal|wide"
  },
  "composition": {
    "layout": "centered|asymmetric|grid|organic",
    "spacing": "tight|balanced|airy",
    "alignment": "left|center|right|justified"
  },
  "effects": {
    "shadows": "none|subtle|dramatic",
    "gradients": true|false,
    "textures": "none|subtle|pronounced",
    "borders": "none|thin|bold"
  },
  "mood": {
    "description": "overall mood description",
    "intensity": 0-100,
    "warmth": "cool|neutral|warm"
  }
}"##;

pub(crate) fn brand_dna(request: &BrandDnaRequest) -> (String, String)
{   let image_context = match (&request.image_url, &request.image_base64)
    {   (Some(url), _) => format!("\nImage URL: {}", url)
      , (None, Some(_)) => "\nAnalyze the provided base64 image".to_string()
      , (None, None) => String::new()
    };

    let user = format!(
      "Analyze this brand/product image and extract the brand DNA.\n{}{}\n\n\
       Extract colors, personality traits, and suggest appropriate fonts.",
      image_context,
      optional_line("Brand Name", request.brand_name.as_deref())
    );
    (BRAND_DNA_SYSTEM.to_string(), user)
}

pub(crate) fn color_psychology(request: &ColorPsychologyRequest)
  -> (String, String)
{   let existing = request
      .existing_colors
      .as_ref()
      .filter(|colors| !colors.is_empty())
      .map(|colors| colors.join(", "));

    let user = format!(
      "Provide color psychology analysis for:\n\
       Target emotion: {}\n\
       Industry: {}{}\n\n\
       Generate comprehensive color recommendations.",
      request.target_emotion,
      request.industry,
      optional_line("Existing brand colors", existing.as_deref())
    );
    (COLOR_SYSTEM.to_string(), user)
}

pub(crate) fn typography_harmony(request: &TypographyHarmonyRequest)
  -> (String, String)
{   let current_fonts = if request.current_heading_font.is_some()
      || request.current_body_font.is_some()
    {   format!(
          "\nCurrent fonts - Heading: {}, Body: {}",
          request.current_heading_font.as_deref().unwrap_or("None"),
          request.current_body_font.as_deref().unwrap_or("None")
        )
    } else
    {   String::new()
    };

    let user = format!(
      "Suggest typography pairings for:\n\
       Brand Style: {}{}{}\n\n\
       Provide harmonious font pairing recommendations.",
      request.brand_style,
      current_fonts,
      optional_line("Context", request.context.as_deref())
    );
    (TYPOGRAPHY_SYSTEM.to_string(), user)
}

pub(crate) fn emotion_design(request: &EmotionDesignRequest)
  -> (String, String)
{   let user = format!(
      "Generate design parameters for:\n\
       Emotion: {}\n\
       Intensity: {}%{}\n\n\
       Create visual parameters that evoke this emotion.",
      request.emotion,
      (request.intensity * 100.0).round(),
      optional_line("Context", request.context.as_deref())
    );
    (EMOTION_SYSTEM.to_string(), user)
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn hex_placeholders_stay_inside_templates()
    {   assert!(BRAND_DNA_SYSTEM.contains(r##""text": "#hexcolor""##));
        assert!(COLOR_SYSTEM.contains(r##"["#hex1", "#hex2", "#hex3", "#hex4", "#hex5"]"##));
        assert!(EMOTION_SYSTEM.contains(r##""background": "#hex","##));
        for system in [BRAND_DNA_SYSTEM, COLOR_SYSTEM, EMOTION_SYSTEM]
        {   assert!(system.ends_with('}'));
        }
    }

    #[test]
    fn brand_dna_prefers_url_over_base64()
    {   let request = BrandDnaRequest
        {   image_url: Some("https://cdn.example.com/logo.png".to_string())
          , image_base64: Some("AAAA".to_string())
          , brand_name: Some("Acme".to_string())
        };
        let (system, user) = brand_dna(&request);
        assert!(system.contains("\"extractedColors\""));
        assert!(user.contains("Image URL: https://cdn.example.com/logo.png"));
        assert!(!user.contains("base64"));
        assert!(user.contains("Brand Name: Acme"));
    }

    #[test]
    fn color_prompt_lists_existing_palette()
    {   let request = ColorPsychologyRequest
        {   target_emotion: "calm".to_string()
          , industry: "wellness".to_string()
          , existing_colors: Some(vec!["#aabbcc".to_string(), "#112233".to_string()])
        };
        let (_, user) = color_psychology(&request);
        assert!(user.contains("Industry: wellness\nExisting brand colors: #aabbcc, #112233"));
    }

    #[test]
    fn typography_fills_missing_font_with_none()
    {   let request = TypographyHarmonyRequest
        {   brand_style: "playful".to_string()
          , current_heading_font: Some("Lobster".to_string())
          , current_body_font: None
          , context: None
        };
        let (_, user) = typography_harmony(&request);
        assert!(user.contains("Current fonts - Heading: Lobster, Body: None"));
        assert!(!user.contains("Context:"));
    }

    #[test]
    fn emotion_intensity_is_a_percentage()
    {   let request = EmotionDesignRequest
        {   emotion: "joy".to_string()
          , intensity: 0.75
          , context: Some("summer launch".to_string())
        };
        let (_, user) = emotion_design(&request);
        assert!(user.contains("Intensity: 75%\nContext: summer launch"));
    }
}
