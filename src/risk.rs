//! Danger score to risk band mapping and user-facing message text.

use std::fmt;

use crate::types::{Classification, ClassificationResult, DangerScore, UNKNOWN_TYPE};

/// Scores at or above this carry the warning line.
pub const WARNING_THRESHOLD: u8 = 7;
/// Extra line appended to messages for dangerous types.
pub const WARNING_TEXT: &str = "Warning: This file type is considered highly dangerous!";
pub const UNREADABLE_TEXT: &str = "Could not determine the file type.";

/// Coarse reading of a [`DangerScore`], ordered from least to most risky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskBand {
    /// Human-readable label shown next to the score.
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "Low Risk",
            RiskBand::Moderate => "Moderate Risk",
            RiskBand::High => "High Risk",
            RiskBand::VeryHigh => "Very High Risk",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Band for `score`: 1-3 low, 4-6 moderate, 7-8 high, 9-10 very high.
pub fn describe(score: DangerScore) -> RiskBand {
    match score.get() {
        ..=3 => RiskBand::Low,
        4..=6 => RiskBand::Moderate,
        7..=8 => RiskBand::High,
        _ => RiskBand::VeryHigh,
    }
}

/// Whether `score` reaches [`WARNING_THRESHOLD`].
pub fn is_dangerous(score: DangerScore) -> bool {
    score.get() >= WARNING_THRESHOLD
}

/// Notification body for `result`, or `None` when the file could not be read.
pub fn compose_message(result: &ClassificationResult) -> Option<String> {
    let name = result.file_name();
    match result.outcome() {
        Classification::Unreadable => None,
        Classification::Unknown => Some(format!("File: {name}\nType: {UNKNOWN_TYPE}")),
        Classification::Known {
            type_id,
            danger_score,
        } => {
            let mut message = format!(
                "File: {name}\nType: {type_id}\nDanger Level: {danger_score}/10 ({})",
                describe(*danger_score)
            );
            if is_dangerous(*danger_score) {
                message.push('\n');
                message.push_str(WARNING_TEXT);
            }
            Some(message)
        }
    }
}

/// One-line console summary.
pub fn summary_line(result: &ClassificationResult) -> String {
    let name = result.file_name();
    match result.outcome() {
        Classification::Unreadable => UNREADABLE_TEXT.to_string(),
        Classification::Unknown => {
            format!("Detected {UNKNOWN_TYPE} for {name} (no danger rating)")
        }
        Classification::Known {
            type_id,
            danger_score,
        } => format!(
            "Detected {type_id} for {name} (Danger Level: {danger_score}/10 - {})",
            describe(*danger_score)
        ),
    }
}
