//! Placeholder canvases substituted for failed batch generations

use serde_json::json;
use crate::catalogue::VariantDescriptor;
use crate::extract::ExtractedPayload;

/// fabric.js document version the canvases declare
pub const CANVAS_VERSION: &str = "5.3.0";
const BACKGROUND_FILL: &str = "#1a1a2e";
const LABEL_FILL: &str = "#ffffff";
const LABEL_FONT_SIZE: u32 = 48;

/// Full-bleed background plus a centered label naming the variant.
/// Pure: same descriptor, same canvas.
pub fn synthesize(variant: &VariantDescriptor) -> ExtractedPayload
{   let (width, height) = variant.dimensions();
    json!({
      "version": CANVAS_VERSION,
      "objects": [
        {
          "type": "rect",
          "left": 0,
          "top": 0,
          "width": width,
          "height": height,
          "fill": BACKGROUND_FILL,
        },
        {
          "type": "text",
          "left": f64::from(width) / 2.0,
          "top": f64::from(height) / 2.0,
          "text": variant.name,
          "fontSize": LABEL_FONT_SIZE,
          "fill": LABEL_FILL,
          "originX": "center",
          "originY": "center",
        },
      ],
    })
}
