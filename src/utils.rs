use chrono::Local;

/// Width of the logger name column, padded with dots.
pub const NAME_WIDTH: usize = 15;
/// Width of the severity column, padded with dots.
pub const PREFIX_WIDTH: usize = 7;

/// Current local time as `YYYY-MM-DD HH:MM:SS.mmm`.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Builds `[<timestamp>] [<name>] [<prefix>] <message>`.
/// Embedded newlines in `message` are kept as is.
pub fn format_log(message: &str, prefix: &str, name: &str) -> String {
    format_log_at(&timestamp(), message, prefix, name)
}

pub(crate) fn format_log_at(time: &str, message: &str, prefix: &str, name: &str) -> String {
    format!(
        "[{time}] [{name:.<name_width$}] [{prefix:.<prefix_width$}] {message}",
        name_width = NAME_WIDTH,
        prefix_width = PREFIX_WIDTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn test_timestamp_shape() {
        let time = timestamp();
        assert_eq!(time.len(), 23);
        assert_eq!(&time[19..20], ".");
        assert!(time[20..].chars().all(|c| c.is_ascii_digit()));
        NaiveDateTime::parse_from_str(&time, "%Y-%m-%d %H:%M:%S%.3f").unwrap();
    }

    #[test]
    fn test_format_log_padding() {
        let line = format_log_at("2024-01-15 10:30:45.456", "some text", "MESSAGE", "Net");
        assert_eq!(
            line,
            "[2024-01-15 10:30:45.456] [Net............] [MESSAGE] some text"
        );
        let line = format_log_at("2024-01-15 10:30:45.456", "x", "ERROR", "Net");
        assert!(line.contains("[ERROR..] x"));
    }

    #[test]
    fn test_format_log_long_name_not_truncated() {
        let line = format_log_at("t", "m", "WARNING", "a-very-long-logger-name");
        assert_eq!(line, "[t] [a-very-long-logger-name] [WARNING] m");
    }

    #[test]
    fn test_format_log_keeps_newlines() {
        let line = format_log("first\nsecond", "MESSAGE", "Net");
        assert!(line.ends_with("] first\nsecond"));
        assert_eq!(line.lines().count(), 2);
    }
}
