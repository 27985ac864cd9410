use std::{str::FromStr, sync::LazyLock};

use derive_from_env::FromEnv;

/// When to emit color sequences on the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Colorize only when the console is an interactive terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_colorize(self, interactive: bool) -> bool {
        match self {
            ColorMode::Auto => interactive,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            other => Err(format!("unknown color mode `{other}`")),
        }
    }
}

#[derive(FromEnv)]
#[from_env(prefix = "DUALLOG")]
#[allow(non_snake_case)]
pub struct DualLogConfig {
    #[from_env(default = "auto")]
    pub COLOR: String,
}

impl DualLogConfig {
    pub fn color_mode(&self) -> ColorMode {
        self.COLOR.parse().unwrap_or_default()
    }
}

impl Default for DualLogConfig {
    fn default() -> Self {
        Self {
            COLOR: "auto".into(),
        }
    }
}

/// Read once per process.
pub static DUALLOG_CONFIG: LazyLock<DualLogConfig> =
    LazyLock::new(|| DualLogConfig::from_env().unwrap_or_default());
