//! The `carousel serve` command.

use crate::web::{self, AppState};
use carousel_core::{CarouselGenerator, Config, Credentials};
use clap::Args;

/// Arguments for the `serve` command.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Address to listen on (defaults to `server.bind`)
    #[arg(short, long)]
    pub bind: Option<String>,
}

impl ServeArgs {
    fn bind_address(&self, config: &Config) -> String {
        self.bind
            .clone()
            .unwrap_or_else(|| config.server.bind.clone())
    }
}

/// Execute the serve command.
///
/// Credentials are resolved once at startup; a missing key aborts before
/// the listener is bound.
pub async fn execute(args: ServeArgs, config: Config) -> anyhow::Result<()> {
    let credentials = Credentials::resolve(&config)?;
    let generator = CarouselGenerator::from_config(&config, &credentials)?;

    let bind = args.bind_address(&config);
    let state = AppState::new(generator, &config);
    web::serve(&bind, state, config.server.max_body_bytes).await
}
