use std::fmt;

use log::Level;

use crate::color::ColorFlags;

/// Tag of a log call, driving both the console color and the line prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Message,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Message,
        Severity::Success,
        Severity::Warning,
        Severity::Error,
    ];

    pub fn prefix(self) -> &'static str {
        match self {
            Severity::Message => "MESSAGE",
            Severity::Success => "SUCCESS",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        }
    }

    pub fn color(self) -> ColorFlags {
        match self {
            Severity::Message => ColorFlags::WHITE,
            Severity::Success => ColorFlags::GREEN | ColorFlags::INTENSITY,
            Severity::Warning => ColorFlags::YELLOW,
            Severity::Error => ColorFlags::RED | ColorFlags::INTENSITY,
        }
    }
}

impl From<Level> for Severity {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => Severity::Error,
            Level::Warn => Severity::Warning,
            Level::Info | Level::Debug | Level::Trace => Severity::Message,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[test]
fn test_severity_table() {
    use crate::color::{AnsiColorizer, TerminalColorizer};
    let ansi = AnsiColorizer;
    let codes: Vec<_> = Severity::ALL
        .iter()
        .map(|s| (s.prefix(), ansi.set_color(s.color()).into_owned()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("MESSAGE", "\x1B[37m".to_string()),
            ("SUCCESS", "\x1B[92m".to_string()),
            ("WARNING", "\x1B[33m".to_string()),
            ("ERROR", "\x1B[91m".to_string()),
        ]
    );
    assert_eq!(Severity::from(Level::Warn), Severity::Warning);
    assert_eq!(Severity::from(Level::Debug), Severity::Message);
}
