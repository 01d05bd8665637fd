//! Exit codes for the diagnostics CLI.
//!
//! Triggered diagnostics never change the exit code; the tool reports and
//! leaves enforcement to the caller. Non-zero codes distinguish why an
//! analysis could not run at all.

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Analysis ran
    Success = 0,
    /// Invalid config file, unknown rule key or bad flag combination
    ConfigError = 2,
    /// Schema file is not valid SDL or fails validation
    SchemaError = 3,
    /// An input file could not be read
    IoError = 4,
    /// Variables are not a JSON object
    ParseError = 5,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self as i32)
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::SchemaError => write!(f, "schema load error"),
            Self::IoError => write!(f, "I/O error"),
            Self::ParseError => write!(f, "parse error"),
        }
    }
}
