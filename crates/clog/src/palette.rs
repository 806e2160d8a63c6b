//! crates/clog/src/palette.rs
//! ANSI escape sequences used to decorate log lines.

/// Table of terminal escape sequences.
///
/// Loggers start with [`Palette::ANSI`] and switch to [`Palette::PLAIN`] when
/// color is disabled. Every field of the plain palette is empty, so rendering
/// code can interpolate the fields unconditionally.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Palette {
    /// Resets all attributes.
    pub reset: &'static str,
    /// Bold or increased intensity.
    pub bright: &'static str,
    /// Faint intensity.
    pub dim: &'static str,
    /// Underline.
    pub underscore: &'static str,
    /// Slow blink.
    pub blink: &'static str,
    /// Swap foreground and background.
    pub reverse: &'static str,
    /// Concealed text.
    pub hidden: &'static str,
    /// Black foreground.
    pub fg_black: &'static str,
    /// Red foreground.
    pub fg_red: &'static str,
    /// Green foreground.
    pub fg_green: &'static str,
    /// Yellow foreground.
    pub fg_yellow: &'static str,
    /// Blue foreground.
    pub fg_blue: &'static str,
    /// Magenta foreground.
    pub fg_magenta: &'static str,
    /// Cyan foreground.
    pub fg_cyan: &'static str,
    /// White foreground.
    pub fg_white: &'static str,
    /// Black background.
    pub bg_black: &'static str,
    /// Red background.
    pub bg_red: &'static str,
    /// Green background.
    pub bg_green: &'static str,
    /// Yellow background.
    pub bg_yellow: &'static str,
    /// Blue background.
    pub bg_blue: &'static str,
    /// Magenta background.
    pub bg_magenta: &'static str,
    /// Cyan background.
    pub bg_cyan: &'static str,
    /// White background.
    pub bg_white: &'static str,
}

impl Palette {
    /// Standard ANSI SGR sequences.
    pub const ANSI: Self = Self {
        reset: "\x1b[0m",
        bright: "\x1b[1m",
        dim: "\x1b[2m",
        underscore: "\x1b[4m",
        blink: "\x1b[5m",
        reverse: "\x1b[7m",
        hidden: "\x1b[8m",
        fg_black: "\x1b[30m",
        fg_red: "\x1b[31m",
        fg_green: "\x1b[32m",
        fg_yellow: "\x1b[33m",
        fg_blue: "\x1b[34m",
        fg_magenta: "\x1b[35m",
        fg_cyan: "\x1b[36m",
        fg_white: "\x1b[37m",
        bg_black: "\x1b[40m",
        bg_red: "\x1b[41m",
        bg_green: "\x1b[42m",
        bg_yellow: "\x1b[43m",
        bg_blue: "\x1b[44m",
        bg_magenta: "\x1b[45m",
        bg_cyan: "\x1b[46m",
        bg_white: "\x1b[47m",
    };

    /// Palette with every sequence cleared.
    pub const PLAIN: Self = Self {
        reset: "",
        bright: "",
        dim: "",
        underscore: "",
        blink: "",
        reverse: "",
        hidden: "",
        fg_black: "",
        fg_red: "",
        fg_green: "",
        fg_yellow: "",
        fg_blue: "",
        fg_magenta: "",
        fg_cyan: "",
        fg_white: "",
        bg_black: "",
        bg_red: "",
        bg_green: "",
        bg_yellow: "",
        bg_blue: "",
        bg_magenta: "",
        bg_cyan: "",
        bg_white: "",
    };

    /// Reports whether this palette emits any escape sequences.
    #[must_use]
    pub fn is_colored(&self) -> bool {
        !self.reset.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ANSI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sequences_start_with_escape() {
        let p = Palette::ANSI;
        for seq in [p.reset, p.dim, p.fg_red, p.fg_yellow, p.fg_blue, p.bg_white] {
            assert!(seq.starts_with("\x1b["), "{seq:?}");
            assert!(seq.ends_with('m'), "{seq:?}");
        }
    }

    #[test]
    fn plain_palette_is_empty() {
        assert!(!Palette::PLAIN.is_colored());
        assert_eq!(Palette::PLAIN.fg_red, "");
        assert_eq!(Palette::PLAIN.dim, "");
    }

    #[test]
    fn default_is_ansi() {
        assert_eq!(Palette::default(), Palette::ANSI);
        assert!(Palette::default().is_colored());
    }
}
