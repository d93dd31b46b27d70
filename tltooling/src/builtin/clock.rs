use chrono::{DateTime, FixedOffset, Local};
use serde_json::{Value, json};
use tlprovider::{ToolArguments, ToolDefinition};

use crate::{Tool, ToolError, ToolExecutionContext, ToolFuture, optional_string};

pub const CLOCK_TOOL_NAME: &str = "get_current_time";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl TimeFormat {
    /// `"12h"` selects the 12-hour clock; anything else, including a missing
    /// value, keeps the 24-hour clock.
    pub fn from_argument(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(format) if format.eq_ignore_ascii_case("12h") => Self::TwelveHour,
            _ => Self::TwentyFourHour,
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::TwentyFourHour => "%H:%M:%S",
            Self::TwelveHour => "%I:%M:%S %p",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ClockSource {
    Local,
    Fixed(DateTime<FixedOffset>),
}

/// Reports the current time, date and UTC offset of the host clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTool {
    source: ClockSource,
}

impl ClockTool {
    pub fn local() -> Self {
        Self {
            source: ClockSource::Local,
        }
    }

    /// Always reports `now`. Used for deterministic output.
    pub fn fixed(now: DateTime<FixedOffset>) -> Self {
        Self {
            source: ClockSource::Fixed(now),
        }
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        match self.source {
            ClockSource::Local => Local::now().fixed_offset(),
            ClockSource::Fixed(now) => now,
        }
    }

    pub fn snapshot(&self, format: TimeFormat) -> Value {
        let now = self.now();
        json!({
            "current_time": now.format(format.pattern()).to_string(),
            "current_date": now.format("%Y-%m-%d").to_string(),
            "timezone": timezone_label(now.offset()),
        })
    }
}

impl Default for ClockTool {
    fn default() -> Self {
        Self::local()
    }
}

fn timezone_label(offset: &FixedOffset) -> String {
    if offset.local_minus_utc() == 0 {
        "UTC".to_string()
    } else {
        offset.to_string()
    }
}

impl Tool for ClockTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            CLOCK_TOOL_NAME,
            "Get the current time, date, and timezone information",
            json!({
                "type": "object",
                "properties": {
                    "format": {
                        "type": "string",
                        "description": "Optional format for the time (default, 24h, 12h)",
                        "enum": ["default", "24h", "12h"]
                    }
                },
                "required": []
            }),
        )
    }

    fn invoke<'a>(
        &'a self,
        args: &'a ToolArguments,
        _context: &'a ToolExecutionContext,
    ) -> ToolFuture<'a, Result<Value, ToolError>> {
        let format = TimeFormat::from_argument(optional_string(args, "format"));
        Box::pin(async move { Ok(self.snapshot(format)) })
    }
}
