use anyhow::Result;
use chrono::FixedOffset;

use crate::output::format::{OutputMode, detect_output_mode};

pub struct RunContext {
    pub output_mode: OutputMode,
    pub tz: FixedOffset,
}

impl RunContext {
    /// Create context from CLI arguments
    pub fn from_args(json: bool, no_color: bool, utc: bool) -> Result<Self> {
        if no_color {
            colored::control::set_override(false);
        }

        let output_mode = detect_output_mode(json);
        let tz = if utc {
            FixedOffset::east_opt(0).ok_or_else(|| anyhow::anyhow!("invalid UTC offset"))?
        } else {
            *chrono::Local::now().offset()
        };

        Ok(RunContext { output_mode, tz })
    }
}
