//! Terminal output helpers.

use std::time::Duration;

use crossterm::style::{Color, StyledContent, Stylize};
use indicatif::{ProgressBar, ProgressStyle};
use lexlogic_core::color::parse_hex;
use lexlogic_core::highlight::Fragment;
use lexlogic_core::HoverState;

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb { r, g, b }
}

/// Terminal background for a fragment. The hovered atom gets its emphasized
/// color; plain text has none.
fn background(fragment: &Fragment, hover: &HoverState) -> Option<Color> {
    match fragment {
        Fragment::Plain { .. } => None,
        Fragment::Highlighted { atom_id, color, .. } => Some(rgb(if hover.is_hovered(*atom_id) {
            color.rgb_hover()
        } else {
            color.rgb_base()
        })),
    }
}

/// Render highlighted fragments with ANSI backgrounds.
pub fn render_fragments(fragments: &[Fragment], hover: &HoverState) -> String {
    fragments
        .iter()
        .map(|fragment| match background(fragment, hover) {
            Some(color) => fragment.text().with(Color::Black).on(color).to_string(),
            None => fragment.text().to_string(),
        })
        .collect()
}

/// A two-space swatch in a `#rrggbb` color.
pub fn swatch(hex: &str) -> String {
    "  ".on(rgb(parse_hex(hex))).to_string()
}

pub fn heading(text: &str) -> StyledContent<&str> {
    text.bold()
}

pub fn dimmed(text: &str) -> StyledContent<&str> {
    text.dark_grey()
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Spinner shown while waiting on a slow backend call.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg} {elapsed:.dim}") {
        pb.set_style(style);
    }
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexlogic_core::color::atom_color;

    fn fly() -> Fragment {
        Fragment::Highlighted {
            atom_id: 1,
            text: "fly".into(),
            color: atom_color(1),
        }
    }

    #[test]
    fn test_render_keeps_text() {
        let fragments = vec![
            Fragment::Plain {
                text: "Birds ".into(),
            },
            fly(),
        ];
        let rendered = render_fragments(&fragments, &HoverState::new());
        assert!(rendered.starts_with("Birds "));
        assert!(rendered.contains("fly"));
    }

    #[test]
    fn test_background_follows_hover() {
        let hover = HoverState::new();
        let color = atom_color(1);
        assert_eq!(background(&fly(), &hover), Some(rgb(color.rgb_base())));

        hover.set(Some(1));
        assert_eq!(background(&fly(), &hover), Some(rgb(color.rgb_hover())));

        let plain = Fragment::Plain { text: "x".into() };
        assert_eq!(background(&plain, &hover), None);
    }
}
