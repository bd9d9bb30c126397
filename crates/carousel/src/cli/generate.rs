//! The `carousel generate` command for one-shot generation.

use anyhow::Context;
use carousel_core::llm::RetryNotice;
use carousel_core::{
    CarouselGenerator, CarouselRequest, Config, Credentials, GenerationOutcome, Tone,
};
use clap::{Args, ValueEnum};
use console::Style;
use std::path::PathBuf;
use std::time::Duration;

/// Supported output formats.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Markdown, one section per slide
    #[default]
    Markdown,
    /// The full carousel as pretty-printed JSON
    Json,
}

/// Tone choices exposed on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ToneArg {
    ScientificWarm,
    InspirationalMotivational,
    MythBustingDirect,
}

impl From<ToneArg> for Tone {
    fn from(arg: ToneArg) -> Self {
        match arg {
            ToneArg::ScientificWarm => Tone::ScientificWarm,
            ToneArg::InspirationalMotivational => Tone::InspirationalMotivational,
            ToneArg::MythBustingDirect => Tone::MythBustingDirect,
        }
    }
}

/// Arguments for the `generate` command.
#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Topic to research (e.g. "Benefits of Turmeric")
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Audience description (e.g. "Women 25-45, gut health conscious")
    #[arg(short, long)]
    pub audience: Option<String>,

    /// Tone of voice (defaults to `carousel.default_tone`)
    #[arg(long, value_enum)]
    pub tone: Option<ToneArg>,

    /// Generate one image per slide
    #[arg(long)]
    pub images: bool,

    /// Fetch research notes from the search service first
    #[arg(long)]
    pub search: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "markdown")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Tone already chosen interactively (not exposed as a flag).
    #[arg(skip)]
    pub tone_override: Option<Tone>,
}

impl GenerateArgs {
    /// Build the request, or `None` when topic or audience is missing.
    fn request(&self, config: &Config) -> Option<CarouselRequest> {
        let topic = self.topic.as_deref().filter(|t| !t.trim().is_empty())?;
        let audience = self.audience.as_deref().filter(|a| !a.trim().is_empty())?;
        let tone = self
            .tone_override
            .or(self.tone.map(Tone::from))
            .unwrap_or(config.carousel.default_tone);
        Some(
            CarouselRequest::new(topic, audience, tone)
                .with_images(self.images)
                .with_search(self.search),
        )
    }
}

/// Execute the generate command.
///
/// Credentials are resolved before anything else; a missing key aborts.
pub async fn execute(args: GenerateArgs, config: Config) -> anyhow::Result<()> {
    let Some(request) = args.request(&config) else {
        anyhow::bail!("Both --topic and --audience are required.");
    };

    let credentials = Credentials::resolve(&config)?;
    let generator = CarouselGenerator::from_config(&config, &credentials)?;

    if request.with_images && !generator.supports_images() {
        tracing::warn!("--images given but image generation is disabled in config");
    }
    if request.with_search && !generator.supports_search() {
        tracing::warn!("--search given but search is disabled in config");
    }

    let spinner = create_spinner("Researching and structuring slides...");
    let observer = {
        let spinner = spinner.clone();
        move |notice: &RetryNotice| spinner.set_message(format!("{notice}"))
    };

    let outcome = generator.generate(&request, &observer).await;
    spinner.finish_and_clear();

    let carousel = match outcome? {
        GenerationOutcome::Completed(carousel) => carousel,
        GenerationOutcome::RateLimited { attempts } => {
            let warn = Style::new().for_stderr().yellow();
            eprintln!(
                "{}",
                warn.apply_to(format!(
                    "Rate limit exceeded after {attempts} attempts. Please try again after some time."
                ))
            );
            return Ok(());
        }
    };

    let rendered = match args.format {
        OutputFormat::Markdown => carousel.to_markdown(),
        OutputFormat::Json => serde_json::to_string_pretty(&carousel)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} slides to {}", carousel.slides.len(), path.display());
        }
        None => println!("{rendered}"),
    }

    let done = Style::new().for_stderr().green();
    eprintln!(
        "{}",
        done.apply_to(format!("Done! {} slides generated.", carousel.slides.len()))
    );
    Ok(())
}

fn create_spinner(message: &str) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
