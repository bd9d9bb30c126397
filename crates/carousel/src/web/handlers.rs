//! Request handlers for the web form.

use super::templates::{IndexTemplate, NoticeTemplate, ResultTemplate, ToneOption};
use super::AppState;
use askama::Template;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use carousel_core::llm::RetryNotice;
use carousel_core::{CarouselError, CarouselRequest, GenerationOutcome, Tone};
use serde::{Deserialize, Serialize};

/// Fields posted by the form. Checkboxes are absent when unticked.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateForm {
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub tone: String,
    pub images: Option<String>,
    pub search: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: carousel_core::VERSION,
    })
}

pub async fn index(State(state): State<AppState>) -> Response {
    render(form_page(&state, &GenerateForm::default(), state.default_tone, None))
}

pub async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    let tone = if form.tone.trim().is_empty() {
        state.default_tone
    } else {
        match form.tone.parse::<Tone>() {
            Ok(tone) => tone,
            Err(e) => return invalid(&state, &form, state.default_tone, e),
        }
    };

    let with_images = form.images.is_some();
    if with_images && !state.generator.supports_images() {
        tracing::warn!("Images requested but image generation is not configured");
    }
    let with_search = form.search.is_some();
    if with_search && !state.generator.supports_search() {
        tracing::warn!("Search requested but search is not configured");
    }

    let request = CarouselRequest::new(form.topic.as_str(), form.audience.as_str(), tone)
        .with_images(with_images)
        .with_search(with_search);
    let observer = |notice: &RetryNotice| tracing::warn!("{notice}");

    match state.generator.generate(&request, &observer).await {
        Ok(GenerationOutcome::Completed(carousel)) => render(ResultTemplate {
            brand: state.brand.clone(),
            carousel,
        }),
        Ok(GenerationOutcome::RateLimited { attempts }) => {
            let page = notice(
                &state,
                "Rate limit exceeded",
                format!(
                    "The text service kept rate limiting after {attempts} attempts. \
                     Please try again after some time."
                ),
            );
            (StatusCode::TOO_MANY_REQUESTS, page).into_response()
        }
        Err(CarouselError::InvalidRequest(message)) => invalid(&state, &form, tone, message),
        Err(CarouselError::Remote(e)) => {
            tracing::error!("Generation failed: {e}");
            let page = notice(
                &state,
                "Generation failed",
                format!("The {} service returned an error. Please try again.", e.service()),
            );
            (StatusCode::BAD_GATEWAY, page).into_response()
        }
        Err(e) => {
            tracing::error!("Generation failed: {e}");
            let page = notice(&state, "Something went wrong", "Please try again.".to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
        }
    }
}

fn form_page(state: &AppState, form: &GenerateForm, tone: Tone, error: Option<String>) -> IndexTemplate {
    IndexTemplate {
        brand: state.brand.clone(),
        error,
        topic: form.topic.clone(),
        audience: form.audience.clone(),
        tones: ToneOption::all(tone),
        images_available: state.generator.supports_images(),
        search_available: state.generator.supports_search(),
    }
}

/// Re-render the form with the user's input and an error line.
fn invalid(state: &AppState, form: &GenerateForm, tone: Tone, message: String) -> Response {
    let page = render(form_page(state, form, tone, Some(message)));
    (StatusCode::BAD_REQUEST, page).into_response()
}

fn notice(state: &AppState, heading: &str, message: String) -> Response {
    render(NoticeTemplate {
        brand: state.brand.clone(),
        heading: heading.to_string(),
        message,
    })
}

fn render(template: impl Template) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
