//! Dialoguer theme and banner for interactive mode.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// Returns a `ColorfulTheme` in the house mint-green palette.
pub fn carousel_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().green(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().green(),
        active_item_style: Style::new().for_stderr().green(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// Prints the banner to stderr so stdout stays clean for carousel output.
pub fn print_banner(brand: &str) {
    let version_line = format!("{brand} Carousel Creator v{}", carousel_core::VERSION);
    let tagline = "Researched carousels from credible sources";

    let inner_width = version_line.chars().count().max(tagline.len()) + 4;

    let top = format!("  ╔{:═<width$}╗", "", width = inner_width);
    let mid1 = format!("  ║{:^width$}║", version_line, width = inner_width);
    let mid2 = format!("  ║{:^width$}║", tagline, width = inner_width);
    let bot = format!("  ╚{:═<width$}╝", "", width = inner_width);

    let green = Style::new().for_stderr().green();

    eprintln!();
    eprintln!("{}", green.apply_to(&top));
    eprintln!("{}", green.apply_to(&mid1));
    eprintln!("{}", green.apply_to(&mid2));
    eprintln!("{}", green.apply_to(&bot));
    eprintln!();
}
