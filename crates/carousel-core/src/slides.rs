//! Splitting a text reply into carousel slides.
//!
//! Replies that follow the requested `Slide N:` layout are parsed into typed
//! fields. Anything else falls back to one slide per non-empty line.

use crate::types::Slide;

#[derive(Clone, Copy)]
enum Field {
    Title,
    Body,
    ImagePrompt,
}

const FIELD_LABELS: &[(&str, Field)] = &[
    ("title", Field::Title),
    ("body text", Field::Body),
    ("body", Field::Body),
    ("dall-e prompt", Field::ImagePrompt),
    ("dalle prompt", Field::ImagePrompt),
    ("visual prompt", Field::ImagePrompt),
    ("image prompt", Field::ImagePrompt),
];

/// Split `text` into at most `max_slides` slides, numbered from 1.
pub fn parse_slides(text: &str, max_slides: usize) -> Vec<Slide> {
    let mut slides = parse_structured(text);
    if slides.is_empty() {
        slides = split_lines(text);
    }
    slides.truncate(max_slides);
    slides
}

/// One slide per non-empty line.
pub fn split_lines(text: &str) -> Vec<Slide> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| Slide {
            number: i + 1,
            raw: line.to_string(),
            ..Default::default()
        })
        .collect()
}

fn parse_structured(text: &str) -> Vec<Slide> {
    let mut slides: Vec<Slide> = Vec::new();
    let mut raw_lines: Vec<&str> = Vec::new();
    let mut current_field: Option<Field> = None;

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(rest) = slide_header(trimmed) {
            if let Some(slide) = slides.last_mut() {
                slide.raw = raw_lines.join("\n");
            }
            raw_lines.clear();
            raw_lines.push(trimmed);
            current_field = None;

            let title = clean_value(rest);
            slides.push(Slide {
                number: slides.len() + 1,
                title: (!title.is_empty()).then_some(title),
                ..Default::default()
            });
            continue;
        }

        // Preamble before the first header is dropped.
        let Some(slide) = slides.last_mut() else {
            continue;
        };
        if trimmed.is_empty() || trimmed.starts_with("---") {
            continue;
        }
        raw_lines.push(trimmed);

        if let Some((field, value)) = field_line(trimmed) {
            let value = clean_value(value);
            *slot_mut(slide, field) = (!value.is_empty()).then_some(value);
            current_field = Some(field);
        } else {
            // Unlabelled lines continue the last field, or the body.
            let field = current_field.unwrap_or(Field::Body);
            append(slot_mut(slide, field), &clean_value(trimmed));
        }
    }

    if let Some(slide) = slides.last_mut() {
        slide.raw = raw_lines.join("\n");
    }
    slides
}

fn append(slot: &mut Option<String>, extra: &str) {
    let merged = match slot.take() {
        Some(mut existing) => {
            existing.push(' ');
            existing.push_str(extra);
            existing
        }
        None => extra.to_string(),
    };
    *slot = Some(merged);
}

fn slot_mut(slide: &mut Slide, field: Field) -> &mut Option<String> {
    match field {
        Field::Title => &mut slide.title,
        Field::Body => &mut slide.body,
        Field::ImagePrompt => &mut slide.image_prompt,
    }
}

/// Strip markdown heading, emphasis, and list markers from the line start.
fn strip_markup(line: &str) -> &str {
    line.trim_start_matches(['#', '*', '_', '-', '>', ' '])
}

/// Recognise `Slide 3:` style headers. Returns the text after the number.
fn slide_header(line: &str) -> Option<&str> {
    let line = strip_markup(line);
    let prefix = line.get(..5)?;
    if !prefix.eq_ignore_ascii_case("slide") {
        return None;
    }
    let rest = line[5..].trim_start();
    let digits = rest.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = rest[digits..].trim_start_matches(['*', '_']);
    let rest = rest.trim_start();
    match rest.chars().next() {
        None => Some(""),
        Some(':' | '.' | ')') => Some(&rest[1..]),
        // `Slide 2-8` is a range, not a header.
        Some('-') if !rest[1..].trim_start().starts_with(|c: char| c.is_ascii_digit()) => {
            Some(&rest[1..])
        }
        Some(_) => None,
    }
}

fn field_line(line: &str) -> Option<(Field, &str)> {
    let line = strip_markup(line);
    let colon = line.find(':')?;
    let label = line[..colon].trim().trim_end_matches(['*', '_']).trim();
    FIELD_LABELS
        .iter()
        .find(|(name, _)| label.eq_ignore_ascii_case(name))
        .map(|(_, field)| (*field, &line[colon + 1..]))
}

/// Trim whitespace, emphasis markers, and surrounding quotes.
fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_matches(['*', '_'])
        .trim()
        .trim_matches(['"', '\u{201c}', '\u{201d}'])
        .trim()
        .to_string()
}
