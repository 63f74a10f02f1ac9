use std::sync::{Arc, Mutex};
use serde_json::json;
use tokio_test::{assert_err, assert_ok};
use creato::catalogue::{CHANNEL_FORMATS, STYLE_VARIATIONS};
use creato::fallback::synthesize;
use creato::schema::*;
use creato::{
  CompletionGateway, CompletionRequest, CompletionResult, Error, Feature,
  ParseFailure, Studio, StudioBackend,
};

type Route = dyn Fn(&CompletionRequest) -> Result<String, Error> + Send + Sync;

/// In-memory gateway answering through a routing closure
struct RoutedGateway
{   route: Box<Route>
  , image: Result<String, Error>
  , calls: Arc<Mutex<Vec<CompletionRequest>>>
}

impl RoutedGateway
{   fn new<F>(route: F) -> Self
    where
      F: Fn(&CompletionRequest) -> Result<String, Error> + Send + Sync + 'static
    {   RoutedGateway
        {   route: Box::new(route)
          , image: Err(Error::RateLimited)
          , calls: Arc::new(Mutex::new(vec![]))
        }
    }

    fn always(text: &str) -> Self
    {   let text = text.to_string();
        RoutedGateway::new(move |_| Ok(text.clone()))
    }
}

impl CompletionGateway for RoutedGateway
{   async fn complete(&self, request: &CompletionRequest)
      -> creato::error::Result<CompletionResult>
    {   self.calls.lock().unwrap().push(request.clone());
        (self.route)(request).map(|raw_text| CompletionResult { raw_text })
    }

    async fn generate_image(&self, _prompt: &str)
      -> creato::error::Result<String>
    {   self.image.clone()
    }
}

fn studio(gateway: RoutedGateway) -> Studio<RoutedGateway>
{   Studio::new(gateway, "test-model")
}

fn campaign(selected: Option<Vec<&str>>) -> CampaignSetRequest
{   CampaignSetRequest
    {   canvas_state: Default::default()
      , campaign_name: "Spring Drop".to_string()
      , product_description: "Trail runner".to_string()
      , selected_channels: selected
          .map(|ids| ids.into_iter().map(str::to_string).collect())
    }
}

#[tokio::test]
async fn test_single_call_returns_extracted_payload()
{   let s = studio(RoutedGateway::always(
      "Here you go!\n```json\n{\"currentTrends\": [], \"industryInsights\": \"steady\"}\n```"
    ));
    let request = TrendForecastRequest
    {   industry: "coffee".to_string()
      , platform: "tiktok".to_string()
      , target_audience: None
    };
    let payload = assert_ok!(s.trend_forecast(&request).await);
    assert_eq!(payload["industryInsights"], "steady");

    let calls = s.gateway().calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].model, "test-model");
    assert_eq!(calls[0].temperature, Feature::TrendForecast.temperature());
    assert!(calls[0].user_prompt.contains("Industry: coffee"));
}

#[tokio::test]
async fn test_single_call_propagates_parse_failure()
{   let s = studio(RoutedGateway::always("I'd rather not."));
    let request = CopywritingRequest
    {   product_name: "Glow".to_string()
      , product_type: "serum".to_string()
      , campaign_type: "launch".to_string()
      , target_audience: None
      , tone: None
      , existing_copy: None
    };
    let err = assert_err!(s.copywriting(&request).await);
    assert_eq!(err, Error::Parse(ParseFailure::NoJsonFound));
    assert_eq!(err.to_string(), "Parse error: no JSON found");
}

#[tokio::test]
async fn test_single_call_propagates_rate_limit()
{   let s = studio(RoutedGateway::new(|_| Err(Error::RateLimited)));
    let request = VisualAuditorRequest
    {   canvas_state: Default::default()
      , image_base64: None
      , design_goal: None
    };
    let err = assert_err!(s.visual_auditor(&request).await);
    assert_eq!(err, Error::RateLimited);
    assert_eq!(err.status_hint(), 429);
}

#[tokio::test]
async fn test_color_psychology_echoes_request()
{   let s = studio(RoutedGateway::always("{\"complementaryPalette\": [\"#111111\"]}"));
    let request = ColorPsychologyRequest
    {   target_emotion: "trust".to_string()
      , industry: "banking".to_string()
      , existing_colors: None
    };
    let response = assert_ok!(s.color_psychology(&request).await);
    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["targetEmotion"], "trust");
    assert_eq!(value["industry"], "banking");
    assert_eq!(value["colorAnalysis"]["complementaryPalette"][0], "#111111");
}

#[tokio::test]
async fn test_brand_dna_requires_an_image()
{   let s = studio(RoutedGateway::always("{}"));
    let err = assert_err!(s.brand_dna(&BrandDnaRequest::default()).await);
    assert!(matches!(err, Error::InvalidRequest(_)));
    assert_eq!(err.status_hint(), 400);
    assert!(s.gateway().calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_brand_dna_builds_brand_kit()
{   let s = studio(RoutedGateway::always(
      "{\"brandDNA\": {\"tone\": \"warm\"}, \"extractedColors\": {\"primary\": \"#AA0000\"}, \"suggestedFonts\": {\"heading\": \"Playfair Display\"}}"
    ));
    let request = BrandDnaRequest
    {   image_url: Some("https://cdn.example.com/product.jpg".to_string())
      , ..Default::default()
    };
    let value = serde_json::to_value(assert_ok!(s.brand_dna(&request).await)).unwrap();
    assert_eq!(value["brandDNA"]["tone"], "warm");
    assert_eq!(value["brandKit"], json!({
      "primaryColor": "#AA0000",
      "secondaryColor": "#38BDF8",
      "accentColor": "#F59E0B",
      "fontHeading": "Playfair Display",
      "fontBody": "Inter"
    }));
    assert_eq!(value["message"], "Brand DNA extracted successfully");
}

#[tokio::test]
async fn test_canvas_control_rejects_empty_prompt()
{   let s = studio(RoutedGateway::always("{}"));
    let request = CanvasControlRequest
    {   prompt: "   ".to_string()
      , canvas_state: None
    };
    let err = assert_err!(s.canvas_control(&request).await);
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[tokio::test]
async fn test_typography_defaults_missing_sections()
{   let s = studio(RoutedGateway::always(
      "{\"suggestions\": [{\"heading\": \"Inter\", \"body\": \"Lora\"}]}"
    ));
    let request = TypographyHarmonyRequest
    {   brand_style: "modern".to_string()
      , current_heading_font: None
      , current_body_font: None
      , context: None
    };
    let value = serde_json::to_value(
      assert_ok!(s.typography_harmony(&request).await)
    ).unwrap();
    assert_eq!(value["suggestions"][0]["body"], "Lora");
    assert_eq!(value["currentAnalysis"], json!({}));
    assert_eq!(value["categories"], json!({}));
}

#[tokio::test]
async fn test_background_uses_image_generation()
{   let mut gateway = RoutedGateway::always("{}");
    gateway.image = Ok("https://cdn.example.com/bg.webp".to_string());
    let s = studio(gateway);
    let request = GenerateBackgroundRequest
    {   prompt: "sunlit linen".to_string()
      , product_context: None
    };
    let response = assert_ok!(s.generate_background(&request).await);
    assert_eq!(response.image_url, "https://cdn.example.com/bg.webp");
    assert!(s.gateway().calls.lock().unwrap().is_empty());

    let err = assert_err!(
      studio(RoutedGateway::always("{}")).generate_background(&request).await
    );
    assert_eq!(err, Error::RateLimited);
}

#[tokio::test]
async fn test_campaign_set_defaults_to_first_five_channels()
{   let s = studio(RoutedGateway::new(|request| {
      Ok(format!("{{\"version\": \"5.3.0\", \"prompt\": {:?}}}", request.user_prompt.lines().next().unwrap_or("")))
    }));
    let response = assert_ok!(s.campaign_set(&campaign(None)).await);

    let hero = response.hero_creative.expect("hero creative");
    assert_eq!(hero.variant.id, "instagram-feed");
    assert_eq!(hero.canvas_data["prompt"], "Create a Instagram Feed creative for:");
    let ids: Vec<&str> = response.variations.iter().map(|v| v.variant.id).collect();
    assert_eq!(ids, vec!["instagram-story", "facebook-feed", "facebook-story", "twitter-post"]);
    assert_eq!(response.all_channels.len(), CHANNEL_FORMATS.len());
    assert_eq!(s.gateway().calls.lock().unwrap().len(), 5);
}

#[tokio::test]
async fn test_campaign_set_substitutes_failed_channels()
{   let s = studio(RoutedGateway::new(|request| {
      if request.system_prompt.contains("Twitter Post")
      {   Err(Error::Gateway { status: 503 })
      } else if request.system_prompt.contains("Facebook Feed")
      {   Ok("Layout: big headline, small logo.".to_string())
      } else
      {   Ok("{\"version\": \"5.3.0\", \"objects\": []}".to_string())
      }
    }));
    let request = campaign(Some(vec!["twitter-post", "youtube-thumbnail", "facebook-feed"]));
    let response = assert_ok!(s.campaign_set(&request).await);

    let hero = response.hero_creative.expect("hero creative");
    assert_eq!(hero.variant.id, "facebook-feed");
    assert_eq!(hero.canvas_data, synthesize(&CHANNEL_FORMATS[2]));

    assert_eq!(response.variations.len(), 2);
    assert_eq!(response.variations[0].variant.id, "twitter-post");
    assert_eq!(response.variations[0].canvas_data, synthesize(&CHANNEL_FORMATS[4]));
    assert_eq!(response.variations[1].variant.id, "youtube-thumbnail");
    assert_eq!(response.variations[1].canvas_data, json!({ "version": "5.3.0", "objects": [] }));
}

#[tokio::test]
async fn test_campaign_set_rejects_unknown_channel()
{   let s = studio(RoutedGateway::always("{}"));
    let request = campaign(Some(vec!["instagram-feed", "myspace-banner"]));
    let err = assert_err!(s.campaign_set(&request).await);
    assert_eq!(err, Error::UnknownVariants(vec!["myspace-banner".to_string()]));
    assert!(s.gateway().calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_multiverse_never_fails_on_generation_errors()
{   let s = studio(RoutedGateway::new(|_| Err(Error::Timeout)));
    let request = CreativeMultiverseRequest
    {   canvas_state: Default::default()
      , product_description: "Oat milk".to_string()
      , selected_styles: None
    };
    let response = assert_ok!(s.creative_multiverse(&request).await);
    assert_eq!(response.variations.len(), 4);
    for (result, style) in response.variations.iter().zip(STYLE_VARIATIONS.iter())
    {   assert_eq!(result.variant, *style);
        assert_eq!(result.canvas_data, synthesize(style));
    }
    assert_eq!(response.all_styles.len(), 8);
    let calls = s.gateway().calls.lock().unwrap().clone();
    assert!(calls.iter().all(|c| c.temperature == Feature::CreativeMultiverse.temperature()));
}

#[tokio::test]
async fn test_run_dispatches_tagged_request()
{   let s = studio(RoutedGateway::always("{\"zones\": [], \"summary\": \"left to right\"}"));
    let request: FeatureRequest = serde_json::from_value(json!({
      "feature": "attention-heatmap",
      "input": {
        "elements": [{ "type": "image", "left": 0, "top": 0, "width": 540, "height": 540 }],
        "canvasWidth": 1080,
        "canvasHeight": 1080,
        "format": "instagram-feed"
      }
    })).unwrap();
    let value = assert_ok!(s.run(&request).await);
    assert_eq!(value["summary"], "left to right");
    let calls = s.gateway().calls.lock().unwrap().clone();
    assert!(calls[0].user_prompt.contains("1. image: center at 25.0%x, 25.0%y"));
}

#[tokio::test]
async fn test_backend_serves_requests_and_shuts_down()
{   let backend = StudioBackend::new(studio(RoutedGateway::always(
      "{\"designParams\": true}"
    )));
    let request = FeatureRequest::EmotionDesign(EmotionDesignRequest
    {   emotion: "calm".to_string()
      , intensity: 0.4
      , context: None
    });

    let mut rx = assert_ok!(backend.generate(request).await);
    let reply = rx.recv().await.expect("reply");
    let value = assert_ok!(reply);
    assert_eq!(value["emotion"], "calm");
    assert_eq!(value["intensity"], 0.4);

    assert_ok!(backend.shutdown().await);
}

#[tokio::test]
async fn test_backend_reports_request_failures()
{   let backend = StudioBackend::new(studio(RoutedGateway::always("no json here")));
    let request = FeatureRequest::PerformancePredictions(PerformancePredictionsRequest
    {   canvas_analysis: Default::default()
    });
    let mut rx = assert_ok!(backend.generate(request).await);
    let reply = rx.recv().await.expect("reply");
    assert_eq!(assert_err!(reply), Error::Parse(ParseFailure::NoJsonFound));
    assert_ok!(backend.shutdown().await);
}
