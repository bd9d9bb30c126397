//! Page templates rendered by the web form.

use askama::Template;
use carousel_core::{Carousel, Tone};

/// One entry in the tone dropdown.
pub struct ToneOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

impl ToneOption {
    pub fn all(selected: Tone) -> Vec<Self> {
        Tone::ALL
            .iter()
            .map(|tone| Self {
                slug: tone.slug(),
                label: tone.label(),
                selected: *tone == selected,
            })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub brand: String,
    pub error: Option<String>,
    pub topic: String,
    pub audience: String,
    pub tones: Vec<ToneOption>,
    pub images_available: bool,
    pub search_available: bool,
}

#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub brand: String,
    pub carousel: Carousel,
}

/// Full-page message, used for rate-limit and failure notices.
#[derive(Template)]
#[template(path = "notice.html")]
pub struct NoticeTemplate {
    pub brand: String,
    pub heading: String,
    pub message: String,
}
