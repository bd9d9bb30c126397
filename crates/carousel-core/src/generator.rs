//! Carousel generation: one user action turned into a sequence of remote calls.
//!
//! The order is fixed: optional search, one retried text call, then one image
//! call per slide. Nothing runs in parallel within a request.

use crate::config::{Config, Credentials};
use crate::error::{CarouselError, ConfigError, Result};
use crate::image::{ImageProvider, OpenAiImageProvider};
use crate::llm::{
    call_with_retry, RetryObserver, RetryOutcome, RetryPolicy, Sleeper, TextProvider,
    TextProviderFactory, TextRequest, TokioSleeper,
};
use crate::prompt;
use crate::search::{SearchOutcome, SearchProvider, TavilyProvider};
use crate::slides;
use crate::types::{Carousel, CarouselRequest, GenerationOutcome, Slide};
use std::sync::Arc;

/// Settings for the generator that do not belong to a single provider.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Brand the copy is written for
    pub brand: String,
    /// Maximum slides kept from the reply
    pub slide_count: usize,
    /// Backoff for rate-limited text calls
    pub retry: RetryPolicy,
    /// Maximum tokens per text call
    pub max_tokens: u32,
    /// Sampling temperature for text calls
    pub temperature: f32,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl GeneratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            brand: config.carousel.brand.clone(),
            slide_count: config.carousel.slide_count,
            retry: RetryPolicy::from(&config.retry),
            max_tokens: config.llm.max_tokens,
            temperature: config.llm.temperature,
        }
    }
}

/// Turns a [`CarouselRequest`] into a [`GenerationOutcome`].
pub struct CarouselGenerator {
    text: Arc<dyn TextProvider>,
    images: Option<Arc<dyn ImageProvider>>,
    search: Option<Arc<dyn SearchProvider>>,
    sleeper: Arc<dyn Sleeper>,
    options: GeneratorOptions,
}

impl CarouselGenerator {
    pub fn new(text: Box<dyn TextProvider>, options: GeneratorOptions) -> Self {
        Self {
            text: Arc::from(text),
            images: None,
            search: None,
            sleeper: Arc::new(TokioSleeper),
            options,
        }
    }

    /// Build every configured provider from config and resolved credentials.
    pub fn from_config(
        config: &Config,
        credentials: &Credentials,
    ) -> std::result::Result<Self, ConfigError> {
        let text = TextProviderFactory::create(config, credentials)?;
        let mut generator = Self::new(text, GeneratorOptions::from_config(config));

        if let Some(key) = &credentials.image_api_key {
            generator = generator.with_images(Box::new(OpenAiImageProvider::new(&config.image, key)));
        }
        if let Some(key) = &credentials.search_api_key {
            generator = generator.with_search(Box::new(TavilyProvider::new(&config.search, key)));
        }

        tracing::debug!(
            "Generator ready: text={}, images={}, search={}",
            generator.text.name(),
            generator.supports_images(),
            generator.supports_search()
        );
        Ok(generator)
    }

    pub fn with_images(mut self, provider: Box<dyn ImageProvider>) -> Self {
        self.images = Some(Arc::from(provider));
        self
    }

    pub fn with_search(mut self, provider: Box<dyn SearchProvider>) -> Self {
        self.search = Some(Arc::from(provider));
        self
    }

    /// Replace the pause implementation between rate-limited attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn supports_images(&self) -> bool {
        self.images.is_some()
    }

    pub fn supports_search(&self) -> bool {
        self.search.is_some()
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Run one generation.
    ///
    /// Rate-limit exhaustion is an `Ok(GenerationOutcome::RateLimited)`;
    /// other text-service failures are returned as errors.
    pub async fn generate(
        &self,
        request: &CarouselRequest,
        observer: &dyn RetryObserver,
    ) -> Result<GenerationOutcome> {
        if request.topic.trim().is_empty() {
            return Err(CarouselError::InvalidRequest("topic must not be empty".into()));
        }
        if request.audience.trim().is_empty() {
            return Err(CarouselError::InvalidRequest(
                "audience must not be empty".into(),
            ));
        }

        tracing::info!(
            "Generating carousel for '{}' ({})",
            request.topic.trim(),
            request.tone
        );

        let research_notes = if request.with_search {
            self.research(request).await
        } else {
            None
        };

        let prompt = prompt::research_prompt(
            request,
            &self.options.brand,
            self.options.slide_count,
            research_notes.as_deref(),
        );
        let text_request = TextRequest {
            prompt,
            max_tokens: self.options.max_tokens,
            temperature: self.options.temperature,
        };

        let outcome = call_with_retry(&self.options.retry, self.sleeper.as_ref(), observer, || {
            self.text.generate(&text_request)
        })
        .await?;

        let (response, attempts) = match outcome {
            RetryOutcome::Success { value, attempts } => (value, attempts),
            RetryOutcome::Exhausted { attempts } => {
                tracing::warn!("Text generation rate limited {attempts} times; giving up");
                return Ok(GenerationOutcome::RateLimited { attempts });
            }
        };

        let mut slides = slides::parse_slides(&response.text, self.options.slide_count);
        tracing::info!(
            "Received {} chars from {}, split into {} slides",
            response.text.len(),
            response.model,
            slides.len()
        );

        if request.with_images {
            self.illustrate(&mut slides).await;
        }

        Ok(GenerationOutcome::Completed(Carousel {
            topic: request.topic.trim().to_string(),
            slides,
            raw_text: response.text,
            research_notes,
            model: response.model,
            attempts,
            tokens_used: response.tokens_used,
            latency_ms: response.latency_ms,
        }))
    }

    /// Fetch research notes, or `None` when search is off or unavailable.
    async fn research(&self, request: &CarouselRequest) -> Option<String> {
        let Some(search) = &self.search else {
            tracing::debug!("Search requested but no search provider is configured");
            return None;
        };

        match search.search(&prompt::search_query(request)).await {
            SearchOutcome::Summary(summary) => {
                tracing::debug!("{} returned {} chars of notes", search.name(), summary.len());
                Some(summary)
            }
            SearchOutcome::Unavailable(reason) => {
                tracing::warn!(
                    "{} unavailable ({reason}); writing without research notes",
                    search.name()
                );
                None
            }
        }
    }

    /// Attach one image per slide. A failure is recorded on that slide only.
    async fn illustrate(&self, slides: &mut [Slide]) {
        let Some(images) = &self.images else {
            tracing::debug!("Images requested but no image provider is configured");
            return;
        };

        for slide in slides.iter_mut() {
            let image_prompt = prompt::image_prompt(slide);
            match images.generate(&image_prompt).await {
                Ok(url) => slide.image_url = Some(url),
                Err(e) => {
                    tracing::warn!("Image for slide {} failed: {e}", slide.number);
                    slide.image_error = Some(e.to_string());
                }
            }
        }
    }
}
