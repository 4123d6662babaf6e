//! Color theme system for dpnav.
//!
//! Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors so it works on any terminal, including
//!   256-color SSH sessions to jump hosts next to the appliances.
//! - `catppuccin_mocha` is the Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;

/// All color values used across dpnav's UI surfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Pane borders
    /// Border color of the pane receiving keys.
    pub border_active: Color,
    pub border_inactive: Color,

    // Listing rows
    /// Directories, domains, filestores and appliances.
    pub container: Color,
    pub file: Color,
    /// Size and modification columns.
    pub details: Color,
    /// The `*` mark column and marked names.
    pub marked: Color,
    pub cursor_bg: Color,
    pub cursor_fg: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
    /// Key names in the hint line.
    pub status_key: Color,

    // Dialog
    pub dialog_border: Color,
    pub dialog_text: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            container: Color::LightBlue,
            file: Color::Reset,
            details: Color::DarkGray,
            marked: Color::Yellow,
            cursor_bg: Color::Cyan,
            cursor_fg: Color::Black,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_key: Color::Cyan,

            dialog_border: Color::Yellow,
            dialog_text: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let base = Color::Rgb(30, 30, 46); // #1e1e2e
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            container: blue,
            file: text,
            details: overlay1,
            marked: yellow,
            cursor_bg: lavender,
            cursor_fg: base,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_key: lavender,

            dialog_border: peach,
            dialog_text: text,
        }
    }

    /// Resolves a theme name to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` with a logged warning, so a typo in
    /// the config never prevents startup.
    ///
    /// # Arguments
    ///
    /// * `name`: theme name from config, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_dark() {
        assert_eq!(Theme::from_name("solarized"), Theme::dark());
        assert_eq!(Theme::from_name("catppuccin_mocha"), Theme::catppuccin_mocha());
    }
}
