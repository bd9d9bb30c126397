//! Interactive mode for bare `carousel` invocation on a TTY.
//!
//! Asks for the same three inputs as the web form, then hands off to
//! `cli::generate::execute()`.

pub mod theme;

use crate::cli::generate::GenerateArgs;
use carousel_core::{Config, Tone};
use dialoguer::theme::Theme;
use dialoguer::{Confirm, Input, Select};

use theme::carousel_theme;

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Entry point for interactive mode.
pub async fn run(config: Config) -> anyhow::Result<()> {
    theme::print_banner(&config.carousel.brand);
    let Some(args) = ask(&config)? else {
        return Ok(());
    };
    crate::cli::generate::execute(args, config).await
}

/// Prompt for topic, audience, tone, and extras. `None` on cancel.
fn ask(config: &Config) -> anyhow::Result<Option<GenerateArgs>> {
    let theme = carousel_theme();

    let Some(topic) = handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Topic (e.g., Benefits of Turmeric)")
            .interact_text(),
    )?
    else {
        return Ok(None);
    };

    let Some(audience) = handle_interrupt(
        Input::<String>::with_theme(&theme)
            .with_prompt("Audience (e.g., Women 25-45, gut health conscious)")
            .interact_text(),
    )?
    else {
        return Ok(None);
    };

    let labels: Vec<&str> = Tone::ALL.iter().map(Tone::label).collect();
    let default_tone = Tone::ALL
        .iter()
        .position(|t| *t == config.carousel.default_tone)
        .unwrap_or(0);
    let Some(Some(tone_idx)) = handle_interrupt(
        Select::with_theme(&theme)
            .with_prompt("Tone style")
            .items(&labels)
            .default(default_tone)
            .interact_opt(),
    )?
    else {
        return Ok(None);
    };

    let images = if config.image.enabled {
        let Some(images) = confirm(&theme, "Generate an image for every slide?", false)? else {
            return Ok(None);
        };
        images
    } else {
        false
    };

    let search = if config.search.enabled {
        let Some(search) = confirm(&theme, "Fetch research notes from web search first?", true)?
        else {
            return Ok(None);
        };
        search
    } else {
        false
    };

    Ok(Some(GenerateArgs {
        topic: Some(topic),
        audience: Some(audience),
        images,
        search,
        tone_override: Tone::ALL.get(tone_idx).copied(),
        ..Default::default()
    }))
}

/// Yes/no question. Esc answers no; an interrupt cancels (`None`).
fn confirm(theme: &dyn Theme, prompt: &str, default: bool) -> anyhow::Result<Option<bool>> {
    let answer = handle_interrupt(
        Confirm::with_theme(theme)
            .with_prompt(prompt)
            .default(default)
            .interact_opt(),
    )?;
    Ok(answer.map(|choice| choice.unwrap_or(false)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_interrupt_cancels() {
        let interrupted: dialoguer::Result<Option<usize>> = Err(dialoguer::Error::IO(
            io::Error::new(io::ErrorKind::Interrupted, "ctrl-c"),
        ));
        assert!(handle_interrupt(interrupted).unwrap().is_none());
    }

    #[test]
    fn test_escape_is_not_an_interrupt() {
        let escaped: dialoguer::Result<Option<bool>> = Ok(None);
        assert_eq!(handle_interrupt(escaped).unwrap(), Some(None));
    }

    #[test]
    fn test_other_io_errors_propagate() {
        let broken: dialoguer::Result<Option<bool>> = Err(dialoguer::Error::IO(io::Error::new(
            io::ErrorKind::BrokenPipe,
            "gone",
        )));
        assert!(handle_interrupt(broken).is_err());
    }
}
