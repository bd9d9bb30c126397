//! Carousel Core - researched social carousels from hosted AI services.
//!
//! A request (topic, audience, tone) becomes one prompt for a text-generation
//! service, optionally preceded by a search call and followed by one
//! image-generation call per slide.
//!
//! # Architecture
//!
//! ```text
//! Request → [Search] → Prompt → Text (retry on 429) → Slides → [Images] → Carousel
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use carousel_core::{CarouselGenerator, CarouselRequest, Config, Credentials, Tone};
//! use carousel_core::llm::SilentObserver;
//!
//! #[tokio::main]
//! async fn main() -> carousel_core::Result<()> {
//!     let config = Config::load()?;
//!     let credentials = Credentials::resolve(&config)?;
//!     let generator = CarouselGenerator::from_config(&config, &credentials)?;
//!
//!     let request = CarouselRequest::new("Benefits of Turmeric", "Women 25-45", Tone::ScientificWarm);
//!     let outcome = generator.generate(&request, &SilentObserver).await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod generator;
pub mod image;
pub mod llm;
pub mod prompt;
pub mod search;
pub mod slides;
pub mod types;

// Re-exports for convenient access
pub use config::{Config, Credentials};
pub use error::{CarouselError, ConfigError, RemoteError, RemoteResult, Result};
pub use generator::{CarouselGenerator, GeneratorOptions};
pub use types::{Carousel, CarouselRequest, GenerationOutcome, Slide, Tone};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
