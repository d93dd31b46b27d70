//! Scores an answer to "what day is today?".
//!
//! ```rust
//! use chrono::NaiveDate;
//! use toolloop::feedback::{DateFeedback, date_feedback_for};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
//! assert_eq!(date_feedback_for("2024-03-09", today), DateFeedback::Success);
//! assert_eq!(date_feedback_for("March 9th", today), DateFeedback::WrongFormat);
//! assert_eq!(date_feedback_for("2024-03-08", today), DateFeedback::WrongDate);
//! ```

use std::fmt::{Display, Formatter};

use chrono::{Local, NaiveDate};

/// Query whose answer [`date_feedback`] scores.
pub const DATE_QUERY: &str =
    "What day is today? Return it in the format YEAR-MONTH-DAY, without any additional text.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFeedback {
    Success,
    WrongFormat,
    WrongDate,
}

impl DateFeedback {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl Display for DateFeedback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("Success!"),
            Self::WrongFormat => f.write_str("Error: Date format incorrect. Expected YYYY-MM-DD."),
            Self::WrongDate => f.write_str("Error: Wrong date."),
        }
    }
}

/// Scores `prediction` against the host's local date.
pub fn date_feedback(prediction: &str) -> DateFeedback {
    date_feedback_for(prediction, Local::now().date_naive())
}

/// `prediction` must be exactly `YYYY-MM-DD`; surrounding whitespace counts
/// as a format error.
pub fn date_feedback_for(prediction: &str, today: NaiveDate) -> DateFeedback {
    if !is_iso_date_shape(prediction) {
        return DateFeedback::WrongFormat;
    }

    if prediction == today.format("%Y-%m-%d").to_string() {
        DateFeedback::Success
    } else {
        DateFeedback::WrongDate
    }
}

fn is_iso_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date")
    }

    #[test]
    fn exact_date_is_success() {
        let feedback = date_feedback_for("2025-01-31", today());
        assert!(feedback.is_success());
        assert_eq!(feedback.to_string(), "Success!");
    }

    #[test]
    fn shape_is_checked_before_the_date() {
        for prediction in [
            "2025-1-31",
            "31-01-2025",
            "2025/01/31",
            " 2025-01-31",
            "2025-01-31\n",
            "Today is 2025-01-31",
            "",
        ] {
            assert_eq!(
                date_feedback_for(prediction, today()),
                DateFeedback::WrongFormat,
                "prediction: {prediction:?}"
            );
        }
        assert_eq!(
            DateFeedback::WrongFormat.to_string(),
            "Error: Date format incorrect. Expected YYYY-MM-DD."
        );
    }

    #[test]
    fn well_formed_but_different_date_is_wrong() {
        assert_eq!(date_feedback_for("2025-01-30", today()), DateFeedback::WrongDate);
        assert_eq!(date_feedback_for("9999-99-99", today()), DateFeedback::WrongDate);
        assert_eq!(DateFeedback::WrongDate.to_string(), "Error: Wrong date.");
    }

    #[test]
    fn host_date_scores_as_success() {
        let now = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let feedback = date_feedback(&now);
        // Tolerates the test straddling midnight.
        assert_ne!(feedback, DateFeedback::WrongFormat);
    }
}
