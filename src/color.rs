use std::{borrow::Cow, ops::BitOr};

use colored::Color;

/// Abstract console color: red, green and blue components plus an intensity bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ColorFlags(u8);

impl ColorFlags {
    pub const NONE: Self = Self(0);
    pub const RED: Self = Self(0x1);
    pub const GREEN: Self = Self(0x2);
    pub const BLUE: Self = Self(0x4);
    pub const INTENSITY: Self = Self(0x8);
    pub const YELLOW: Self = Self(0x1 | 0x2);
    pub const WHITE: Self = Self(0x1 | 0x2 | 0x4);

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Terminal color for this combination, if it is one of the recognized ones.
    /// Magenta and cyan combinations are not mapped.
    pub fn to_color(self) -> Option<Color> {
        let bright = self.contains(Self::INTENSITY);
        let color = match (self.0 & Self::WHITE.0, bright) {
            (0x1, false) => Color::Red,
            (0x1, true) => Color::BrightRed,
            (0x2, false) => Color::Green,
            (0x2, true) => Color::BrightGreen,
            (0x4, false) => Color::Blue,
            (0x4, true) => Color::BrightBlue,
            (0x3, false) => Color::Yellow,
            (0x3, true) => Color::BrightYellow,
            (0x7, false) => Color::White,
            (0x7, true) => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

impl BitOr for ColorFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Turns [`ColorFlags`] into whatever the console needs to switch colors.
pub trait TerminalColorizer: Send + Sync {
    /// Sequence selecting `color`. Empty when the color is not mapped or colors are off.
    fn set_color(&self, color: ColorFlags) -> Cow<'static, str>;
    /// Sequence restoring the default attributes.
    fn reset(&self) -> &'static str;
    fn is_enabled(&self) -> bool;
}

const ANSI_RESET: &str = "\x1B[0m";

/// SGR escape sequences (30-37 / 90-97).
#[derive(Debug, Default, Clone, Copy)]
pub struct AnsiColorizer;

impl TerminalColorizer for AnsiColorizer {
    fn set_color(&self, color: ColorFlags) -> Cow<'static, str> {
        match color.to_color() {
            Some(color) => Cow::Owned(format!("\x1B[{}m", color.to_fg_str())),
            None => Cow::Borrowed(""),
        }
    }

    fn reset(&self) -> &'static str {
        ANSI_RESET
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Used when the console is not an interactive terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainColorizer;

impl TerminalColorizer for PlainColorizer {
    fn set_color(&self, _: ColorFlags) -> Cow<'static, str> {
        Cow::Borrowed("")
    }

    fn reset(&self) -> &'static str {
        ""
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Picks the colorizer backend once, at logger construction.
pub fn select_colorizer(colorize: bool) -> Box<dyn TerminalColorizer> {
    if colorize && ansi_supported() {
        Box::new(AnsiColorizer)
    } else {
        Box::new(PlainColorizer)
    }
}

#[cfg(windows)]
fn ansi_supported() -> bool {
    // Switches the native console into virtual terminal mode.
    colored::control::set_virtual_terminal(true).is_ok()
}

#[cfg(not(windows))]
fn ansi_supported() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ansi_codes() {
        let ansi = AnsiColorizer;
        assert_eq!(ansi.set_color(ColorFlags::RED), "\x1B[31m");
        assert_eq!(ansi.set_color(ColorFlags::GREEN), "\x1B[32m");
        assert_eq!(ansi.set_color(ColorFlags::BLUE), "\x1B[34m");
        assert_eq!(ansi.set_color(ColorFlags::YELLOW), "\x1B[33m");
        assert_eq!(ansi.set_color(ColorFlags::WHITE), "\x1B[37m");
        assert_eq!(
            ansi.set_color(ColorFlags::RED | ColorFlags::INTENSITY),
            "\x1B[91m"
        );
        assert_eq!(
            ansi.set_color(ColorFlags::GREEN | ColorFlags::INTENSITY),
            "\x1B[92m"
        );
        assert_eq!(
            ansi.set_color(ColorFlags::YELLOW | ColorFlags::INTENSITY),
            "\x1B[93m"
        );
        assert_eq!(
            ansi.set_color(ColorFlags::WHITE | ColorFlags::INTENSITY),
            "\x1B[97m"
        );
    }

    #[test]
    fn test_unmapped_combinations_are_noop() {
        let ansi = AnsiColorizer;
        assert_eq!(ansi.set_color(ColorFlags::NONE), "");
        assert_eq!(ansi.set_color(ColorFlags::INTENSITY), "");
        assert_eq!(ansi.set_color(ColorFlags::RED | ColorFlags::BLUE), "");
        assert_eq!(ansi.set_color(ColorFlags::GREEN | ColorFlags::BLUE), "");
    }

    #[test]
    fn test_reset_is_true_reset() {
        // The reset must not be the white attribute, whatever the terminal default is.
        let ansi = AnsiColorizer;
        assert_eq!(ansi.reset(), "\x1B[0m");
        assert_ne!(ansi.reset(), ansi.set_color(ColorFlags::WHITE));
    }

    #[test]
    fn test_plain_colorizer_is_silent() {
        let plain = PlainColorizer;
        assert!(!plain.is_enabled());
        assert_eq!(plain.set_color(ColorFlags::RED | ColorFlags::INTENSITY), "");
        assert_eq!(plain.reset(), "");
        assert!(!select_colorizer(false).is_enabled());
    }

    #[test]
    fn test_flags() {
        let flags = ColorFlags::RED | ColorFlags::INTENSITY;
        assert!(flags.contains(ColorFlags::RED));
        assert!(!flags.contains(ColorFlags::GREEN));
        assert_eq!(ColorFlags::RED | ColorFlags::GREEN, ColorFlags::YELLOW);
        assert_eq!(ColorFlags::YELLOW | ColorFlags::BLUE, ColorFlags::WHITE);
    }

    #[test]
    fn test_selected_backend_never_resets_to_white() {
        // Whatever backend the platform ends up with (ANSI, or plain when a
        // Windows console refuses virtual terminal mode), reset is either a
        // true SGR reset or nothing, never the white attribute.
        for colorize in [true, false] {
            let colorizer = select_colorizer(colorize);
            let reset = colorizer.reset();
            if colorizer.is_enabled() {
                assert_eq!(reset, "\x1B[0m");
                assert_ne!(reset, colorizer.set_color(ColorFlags::WHITE));
            } else {
                assert_eq!(reset, "");
                assert_eq!(colorizer.set_color(ColorFlags::WHITE), "");
            }
        }
        #[cfg(not(windows))]
        assert!(select_colorizer(true).is_enabled());
    }
}
