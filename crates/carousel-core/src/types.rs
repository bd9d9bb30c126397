//! Core data types for carousel generation.
//!
//! A request carries the three form inputs; a generation either completes
//! with a [`Carousel`] or ends because the text service kept rate limiting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Voice the generated copy should be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    #[default]
    ScientificWarm,
    InspirationalMotivational,
    MythBustingDirect,
}

impl Tone {
    /// All tones in the order they are offered to the user.
    pub const ALL: [Tone; 3] = [
        Tone::ScientificWarm,
        Tone::InspirationalMotivational,
        Tone::MythBustingDirect,
    ];

    /// Human-readable label, as interpolated into the prompt.
    pub fn label(&self) -> &'static str {
        match self {
            Tone::ScientificWarm => "Scientific Warm",
            Tone::InspirationalMotivational => "Inspirational Motivational",
            Tone::MythBustingDirect => "Myth-Busting Direct",
        }
    }

    /// Stable identifier used in forms, config, and CLI flags.
    pub fn slug(&self) -> &'static str {
        match self {
            Tone::ScientificWarm => "scientific-warm",
            Tone::InspirationalMotivational => "inspirational-motivational",
            Tone::MythBustingDirect => "myth-busting-direct",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = String;

    /// Accepts either the slug or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Tone::ALL
            .into_iter()
            .find(|t| t.slug().eq_ignore_ascii_case(needle) || t.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("Unknown tone: {needle}"))
    }
}

/// One user action: what to write about, for whom, and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselRequest {
    /// Free-text topic (e.g. "Benefits of Turmeric")
    pub topic: String,

    /// Free-text audience description (e.g. "Women 25-45, gut health conscious")
    pub audience: String,

    pub tone: Tone,

    /// Generate one image per slide after the text comes back
    #[serde(default)]
    pub with_images: bool,

    /// Ask the search service for research notes before writing
    #[serde(default)]
    pub with_search: bool,
}

impl CarouselRequest {
    pub fn new(topic: impl Into<String>, audience: impl Into<String>, tone: Tone) -> Self {
        Self {
            topic: topic.into(),
            audience: audience.into(),
            tone,
            with_images: false,
            with_search: false,
        }
    }

    pub fn with_images(mut self, enabled: bool) -> Self {
        self.with_images = enabled;
        self
    }

    pub fn with_search(mut self, enabled: bool) -> Self {
        self.with_search = enabled;
        self
    }
}

/// One unit of carousel output.
///
/// Typed fields are filled when the reply follows the `Slide N:` layout;
/// `raw` always holds the text the slide was cut from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based position in the carousel
    pub number: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Prompt intended for the image-generation service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,

    pub raw: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Why image generation failed for this slide, if it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
}

/// A finished carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Carousel {
    pub topic: String,

    pub slides: Vec<Slide>,

    /// The full reply from the text service, unmodified
    pub raw_text: String,

    /// Research summary that was fed into the prompt, if search ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub research_notes: Option<String>,

    /// Model identifier reported by the text service
    pub model: String,

    /// Number of text-generation attempts it took
    pub attempts: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens_used: Option<u32>,

    /// Round-trip latency of the successful text call in milliseconds
    pub latency_ms: u64,
}

impl Carousel {
    /// Render as markdown, one section per slide.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("# {}\n", self.topic);
        for slide in &self.slides {
            out.push_str(&format!("\n## Slide {}\n\n", slide.number));
            match (&slide.title, &slide.body) {
                (None, None) => out.push_str(&format!("{}\n", slide.raw)),
                (title, body) => {
                    if let Some(title) = title {
                        out.push_str(&format!("**{title}**\n\n"));
                    }
                    if let Some(body) = body {
                        out.push_str(&format!("{body}\n"));
                    }
                }
            }
            if let Some(prompt) = &slide.image_prompt {
                out.push_str(&format!("\n_Visual prompt:_ {prompt}\n"));
            }
            if let Some(url) = &slide.image_url {
                out.push_str(&format!("\n![Slide {}]({url})\n", slide.number));
            }
            if let Some(err) = &slide.image_error {
                out.push_str(&format!("\n_Image unavailable:_ {err}\n"));
            }
        }
        out
    }
}

/// The two ways a generation can end without an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcome {
    Completed(Carousel),

    /// The text service kept rate limiting until attempts ran out
    RateLimited { attempts: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_parses_slug_and_label() {
        assert_eq!("scientific-warm".parse::<Tone>(), Ok(Tone::ScientificWarm));
        assert_eq!(
            "Myth-Busting Direct".parse::<Tone>(),
            Ok(Tone::MythBustingDirect)
        );
        assert_eq!(
            " inspirational motivational ".parse::<Tone>(),
            Ok(Tone::InspirationalMotivational)
        );
        assert!("sarcastic".parse::<Tone>().is_err());
    }

    #[test]
    fn test_tone_serde_uses_slug() {
        let json = serde_json::to_string(&Tone::MythBustingDirect).unwrap();
        assert_eq!(json, "\"myth-busting-direct\"");
    }

    #[test]
    fn test_request_builders() {
        let req = CarouselRequest::new("Turmeric", "Women 25-45", Tone::ScientificWarm)
            .with_images(true)
            .with_search(true);
        assert!(req.with_images);
        assert!(req.with_search);
    }

    #[test]
    fn test_markdown_prefers_typed_fields() {
        let carousel = Carousel {
            topic: "Turmeric".into(),
            slides: vec![
                Slide {
                    number: 1,
                    title: Some("Golden Healing".into()),
                    body: Some("Curcumin calms inflammation.".into()),
                    image_prompt: Some("Turmeric root on mint background".into()),
                    raw: "Slide 1: ...".into(),
                    image_url: Some("https://img.example/1.png".into()),
                    image_error: None,
                },
                Slide {
                    number: 2,
                    raw: "Just a line".into(),
                    ..Default::default()
                },
            ],
            raw_text: String::new(),
            research_notes: None,
            model: "gpt-4o".into(),
            attempts: 1,
            tokens_used: None,
            latency_ms: 0,
        };
        let md = carousel.to_markdown();
        assert!(md.contains("**Golden Healing**"));
        assert!(md.contains("![Slide 1](https://img.example/1.png)"));
        assert!(md.contains("## Slide 2\n\nJust a line"));
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(GenerationOutcome::RateLimited { attempts: 3 }).unwrap();
        assert_eq!(json["status"], "rate_limited");
        assert_eq!(json["attempts"], 3);
    }
}
