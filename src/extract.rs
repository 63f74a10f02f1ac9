//! Recovery of a JSON payload from free-text model output
//!
//! Models wrap JSON in prose or markdown fences. Two conventions are
//! accepted, tried in order, and the first that yields a span wins:
//!
//! 1. a fenced code block, optionally tagged `json`
//! 2. the span from the first `{` to the last `}`
//!
//! A span that does not parse is a `MalformedJson` failure; there is no
//! fall-through from a bad fenced block to the brace span.

use std::sync::OnceLock;
use regex::Regex;
use log::trace;
use crate::error::ParseFailure;

/// Parsed JSON value recovered from model text
pub type ExtractedPayload = serde_json::Value;

fn fence_pattern() -> &'static Regex
{   static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
      Regex::new(r"```(?:json)?\s*([\s\S]*?)```")
        .expect("fence pattern is valid")
    })
}

/// Inner text of the first fenced block
pub fn fenced_span(raw_text: &str) -> Option<&str>
{   fence_pattern()
      .captures(raw_text)
      .and_then(|c| c.get(1))
      .map(|m| m.as_str().trim())
}

/// Greedy first-`{` to last-`}` span
pub fn brace_span(raw_text: &str) -> Option<&str>
{   let start = raw_text.find('{')?;
    let end = raw_text.rfind('}')?;
    (end > start).then(|| &raw_text[start..=end])
}

/// Recover a single JSON value from `raw_text`
pub fn extract(raw_text: &str)
  -> Result<ExtractedPayload, ParseFailure>
{   let span = fenced_span(raw_text)
      .or_else(|| brace_span(raw_text))
      .ok_or(ParseFailure::NoJsonFound)?;
    trace!("Extracting JSON from {} byte span", span.len());
    serde_json::from_str(span)
      .map_err(|e| ParseFailure::MalformedJson(e.to_string()))
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn fenced_json_block()
    {   let text = "Here you go:\n```json\n{\"a\": [1, 2]}\n```\nEnjoy!";
        assert_eq!(extract(text).unwrap(), json!({ "a": [1, 2] }));
    }

    #[test]
    fn untagged_fence()
    {   let text = "```\n{\"version\": \"5.3.0\"}\n```";
        assert_eq!(extract(text).unwrap(), json!({ "version": "5.3.0" }));
    }

    #[test]
    fn fenced_array_is_accepted()
    {   let text = "```json\n[{\"x\": 1}]\n```";
        assert_eq!(extract(text).unwrap(), json!([{ "x": 1 }]));
    }

    #[test]
    fn fence_wins_over_surrounding_braces()
    {   let text = "{not json} ```json\n{\"ok\": true}\n``` {also not}";
        assert_eq!(extract(text).unwrap(), json!({ "ok": true }));
    }

    #[test]
    fn inline_object_inside_prose()
    {   let text = "Sure! {\"zones\": [], \"summary\": \"calm\"} Hope that helps.";
        assert_eq!(
          extract(text).unwrap(),
          json!({ "zones": [], "summary": "calm" })
        );
    }

    #[test]
    fn greedy_span_over_two_objects_is_malformed()
    {   let text = "first {\"a\": 1} then {\"b\": 2}";
        assert!(matches!(
          extract(text),
          Err(ParseFailure::MalformedJson(_))
        ));
    }

    #[test]
    fn bad_fenced_block_does_not_fall_through()
    {   let text = "```json\nnot json\n``` {\"a\": 1}";
        assert!(matches!(
          extract(text),
          Err(ParseFailure::MalformedJson(_))
        ));
    }

    #[test]
    fn no_brace_at_all()
    {   assert_eq!(
          extract("I cannot help with that."),
          Err(ParseFailure::NoJsonFound)
        );
        assert_eq!(extract("} backwards {"), Err(ParseFailure::NoJsonFound));
    }

    #[test]
    fn nested_braces_in_strings_survive()
    {   let text = "Result: {\"text\": \"use {curly} braces\", \"n\": {\"m\": 1}}";
        assert_eq!(
          extract(text).unwrap(),
          json!({ "text": "use {curly} braces", "n": { "m": 1 } })
        );
    }
}
