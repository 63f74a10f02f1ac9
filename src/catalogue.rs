//! Fixed catalogues of batch output targets and their selection rules

use serde::Serialize;
use log::debug;

/// Upper bound on variants processed by one batch
pub const MAX_VARIANTS: usize = 8;
/// Channels used when the caller names none
pub const DEFAULT_CHANNEL_COUNT: usize = 5;
/// Styles used when the caller names none
pub const DEFAULT_STYLE_COUNT: usize = 4;
/// Square canvas edge used for style variants
pub const STYLE_CANVAS_SIZE: u32 = 1080;

/// What a variant targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VariantKind
{   /// An ad channel format with fixed pixel dimensions
    Channel
    {   width: u32
      , height: u32
      , platform: &'static str
    }
  , /// A design style rendered on the square canvas
    Style
    {   description: &'static str
    }
}

/// One entry of a fixed catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantDescriptor
{   pub id: &'static str
  , pub name: &'static str
  , #[serde(flatten)]
    pub kind: VariantKind
}

impl VariantDescriptor
{   const fn channel(
      id: &'static str
    , name: &'static str
    , width: u32
    , height: u32
    , platform: &'static str
    ) -> Self
    {   VariantDescriptor
        {   id
          , name
          , kind: VariantKind::Channel { width, height, platform }
        }
    }

    const fn style(
      id: &'static str
    , name: &'static str
    , description: &'static str
    ) -> Self
    {   VariantDescriptor
        {   id
          , name
          , kind: VariantKind::Style { description }
        }
    }

    /// Target canvas size in pixels
    pub fn dimensions(&self) -> (u32, u32)
    {   match self.kind
        {   VariantKind::Channel { width, height, .. } => (width, height)
          , VariantKind::Style { .. } => {
              (STYLE_CANVAS_SIZE, STYLE_CANVAS_SIZE)
            }
        }
    }
}

pub const CHANNEL_FORMATS: [VariantDescriptor; 8] = [
  VariantDescriptor::channel("instagram-feed", "Instagram Feed", 1080, 1080, "instagram"),
  VariantDescriptor::channel("instagram-story", "Instagram Story", 1080, 1920, "instagram"),
  VariantDescriptor::channel("facebook-feed", "Facebook Feed", 1200, 628, "facebook"),
  VariantDescriptor::channel("facebook-story", "Facebook Story", 1080, 1920, "facebook"),
  VariantDescriptor::channel("twitter-post", "Twitter Post", 1200, 675, "twitter"),
  VariantDescriptor::channel("linkedin-post", "LinkedIn Post", 1200, 627, "linkedin"),
  VariantDescriptor::channel("youtube-thumbnail", "YouTube Thumbnail", 1280, 720, "youtube"),
  VariantDescriptor::channel("pinterest-pin", "Pinterest Pin", 1000, 1500, "pinterest"),
];

pub const STYLE_VARIATIONS: [VariantDescriptor; 8] = [
  VariantDescriptor::style("minimalist", "Minimalist", "Clean, simple, lots of white space"),
  VariantDescriptor::style("bold", "Bold & Vibrant", "Strong colors, impactful typography"),
  VariantDescriptor::style("elegant", "Elegant", "Sophisticated, refined, luxury feel"),
  VariantDescriptor::style("playful", "Playful", "Fun, colorful, energetic"),
  VariantDescriptor::style("retro", "Retro", "Vintage-inspired, nostalgic"),
  VariantDescriptor::style("futuristic", "Futuristic", "Modern, tech-forward, innovative"),
  VariantDescriptor::style("organic", "Organic", "Natural, earthy, sustainable"),
  VariantDescriptor::style("brutalist", "Brutalist", "Raw, bold, unconventional"),
];

/// Pick variants from `catalogue`.
///
/// Named ids keep catalogue order, not request order. Without ids (or
/// with an empty list) the first `default_count` entries are used. Ids
/// the catalogue does not know fail the whole selection.
pub fn select(
  catalogue: &[VariantDescriptor]
, requested: Option<&[String]>
, default_count: usize
) -> crate::error::Result<Vec<VariantDescriptor>>
{   let selected: Vec<VariantDescriptor> = match requested
    {   Some(ids) if !ids.is_empty() => {
          let unknown: Vec<String> = ids
            .iter()
            .filter(|id| !catalogue.iter().any(|v| v.id == id.as_str()))
            .cloned()
            .collect();
          if !unknown.is_empty()
          {   return Err(crate::error::Error::UnknownVariants(unknown));
          }
          catalogue
            .iter()
            .filter(|v| ids.iter().any(|id| id == v.id))
            .copied()
            .collect()
        }
      , _ => catalogue.iter().take(default_count).copied().collect()
    };

    if selected.is_empty()
    {   return Err(crate::error::Error::EmptySelection);
    }

    debug!(
      "Selected {} variants: {:?}",
      selected.len().min(MAX_VARIANTS),
      selected.iter().map(|v| v.id).collect::<Vec<_>>()
    );
    Ok(selected.into_iter().take(MAX_VARIANTS).collect())
}

pub fn select_channels(requested: Option<&[String]>)
  -> crate::error::Result<Vec<VariantDescriptor>>
{   select(&CHANNEL_FORMATS, requested, DEFAULT_CHANNEL_COUNT)
}

pub fn select_styles(requested: Option<&[String]>)
  -> crate::error::Result<Vec<VariantDescriptor>>
{   select(&STYLE_VARIATIONS, requested, DEFAULT_STYLE_COUNT)
}
