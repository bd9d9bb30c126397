//! Prompt templates for research, copywriting, and slide visuals.

use crate::types::{CarouselRequest, Slide};

/// Build the master research-and-structure prompt.
///
/// `research_notes` is the search summary, when one was fetched.
pub fn research_prompt(
    request: &CarouselRequest,
    brand: &str,
    slide_count: usize,
    research_notes: Option<&str>,
) -> String {
    let last = slide_count.max(1);
    let middle = if last > 2 {
        format!("- Slide 2-{}: Logical flow, one idea per slide.\n", last - 1)
    } else {
        String::new()
    };

    let mut prompt = format!(
        "You are a health researcher and Instagram content creator for the brand {brand}.\n\
         \n\
         Research deeply about: {topic}.\n\
         - Only use credible sources: PubMed, Mayo Clinic, NIH, Healthline.\n\
         - Summarize 3-5 key scientific findings in simple, friendly, motivational language.\n\
         - Lightly cite studies at the end of major points.\n\
         \n\
         Then structure this into a {last}-slide Instagram carousel:\n\
         - Slide 1: Big emotional hook (max 8 words)\n\
         {middle}\
         - Slide {last}: Motivational Call to Action (e.g., \"Share this healing tip\")\n\
         \n\
         Each slide must have:\n\
         - Title (max 8 words)\n\
         - Body Text (1-2 motivational, educational sentences)\n\
         \n\
         After each slide, create an image generation prompt:\n\
         Visual Prompt Rules:\n\
         - 1:1 aspect ratio\n\
         - Soft mint green or pastel background\n\
         - Minimalist, flat design\n\
         - Wellness, healing, and positivity vibe\n\
         - Icons or metaphors if appropriate\n\
         \n\
         Target Audience: {audience}\n\
         Tone Style: {tone}\n",
        topic = request.topic.trim(),
        audience = request.audience.trim(),
        tone = request.tone.label(),
    );

    if let Some(notes) = research_notes {
        prompt.push_str(&format!(
            "\nResearch notes (from a web search, verify before relying on them):\n{notes}\n"
        ));
    }

    prompt.push_str(&format!(
        "\nOutput Format:\n\
         Slide 1:\n\
         Title: \"\"\n\
         Body Text: \"\"\n\
         Visual Prompt: \"\"\n\
         Slide 2:\n\
         Title: \"\"\n\
         Body Text: \"\"\n\
         Visual Prompt: \"\"\n\
         ...(continue till Slide {last})\n"
    ));

    prompt
}

/// Search query used to gather research notes.
pub fn search_query(request: &CarouselRequest) -> String {
    format!(
        "Scientific evidence and health benefits: {}",
        request.topic.trim()
    )
}

/// Build the image-generation prompt for one slide.
///
/// Uses the slide's own visual prompt when present, otherwise describes the
/// slide text in the house style.
pub fn image_prompt(slide: &Slide) -> String {
    if let Some(prompt) = slide.image_prompt.as_deref().filter(|p| !p.trim().is_empty()) {
        return prompt.trim().to_string();
    }

    let subject = match (&slide.title, &slide.body) {
        (Some(title), Some(body)) => format!("{title}. {body}"),
        (Some(text), None) | (None, Some(text)) => text.clone(),
        (None, None) => slide.raw.clone(),
    };

    format!(
        "Minimalist flat illustration, 1:1, soft mint green pastel background, \
         wellness and positivity vibe, no text: {}",
        subject.trim()
    )
}
