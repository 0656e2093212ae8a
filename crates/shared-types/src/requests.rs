//! # Request Vocabulary
//!
//! The two request kinds tracked by the board contract and the closed set of
//! status codes they move through.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::UnknownKind;

// =============================================================================
// REQUEST KIND
// =============================================================================

/// One of the two parallel request categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Integration request, rendered as `IR-n`.
    Integration,
    /// Problem report, rendered as `PR-n`.
    ProblemReport,
}

impl RequestKind {
    /// Both kinds, in display order.
    pub const ALL: [RequestKind; 2] = [RequestKind::Integration, RequestKind::ProblemReport];

    /// Prefix prepended to the on-chain index to form the row id.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Self::Integration => "IR-",
            Self::ProblemReport => "PR-",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Integration => "Integration Request",
            Self::ProblemReport => "Problem Report",
        }
    }

    /// Stable short name used on the command line and in logs.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Integration => "integrations",
            Self::ProblemReport => "problem-reports",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for RequestKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "integrations" | "integration" | "ir" => Ok(Self::Integration),
            "problem-reports" | "problem-report" | "problem_reports" | "pr" | "issues" => {
                Ok(Self::ProblemReport)
            }
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Display category used to color a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Primary,
    Warning,
    Default,
    Success,
    Danger,
}

impl StatusColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Warning => "warning",
            Self::Default => "default",
            Self::Success => "success",
            Self::Danger => "danger",
        }
    }
}

/// Lifecycle status of a request.
///
/// The contract defines codes 0 through 5. Any other code decodes to
/// [`RequestStatus::Unknown`] so that a newer contract never breaks rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    New,
    InReview,
    Deferred,
    Done,
    Rejected,
    Hidden,
    Unknown(u8),
}

impl RequestStatus {
    /// The six defined statuses, in code order.
    pub const ALL: [RequestStatus; 6] = [
        RequestStatus::New,
        RequestStatus::InReview,
        RequestStatus::Deferred,
        RequestStatus::Done,
        RequestStatus::Rejected,
        RequestStatus::Hidden,
    ];

    /// Classify a raw status code. Never fails.
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => Self::New,
            1 => Self::InReview,
            2 => Self::Deferred,
            3 => Self::Done,
            4 => Self::Rejected,
            5 => Self::Hidden,
            other => Self::Unknown(u8::try_from(other).unwrap_or(u8::MAX)),
        }
    }

    /// Numeric status code as stored on chain.
    pub fn code(&self) -> u8 {
        match self {
            Self::New => 0,
            Self::InReview => 1,
            Self::Deferred => 2,
            Self::Done => 3,
            Self::Rejected => 4,
            Self::Hidden => 5,
            Self::Unknown(code) => *code,
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// Short option name, as used by the status filter menu.
    pub fn name(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InReview => "in_review",
            Self::Deferred => "deferred",
            Self::Done => "done",
            Self::Rejected => "rej",
            Self::Hidden => "hide",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Upper-case label, as shown in the "Change to ..." actions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InReview => "IN_REVIEW",
            Self::Deferred => "DEFERRED",
            Self::Done => "DONE",
            Self::Rejected => "REJECTED",
            Self::Hidden => "HIDDEN",
            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Presentation category. Total over every code.
    pub fn color(&self) -> StatusColor {
        match self {
            Self::New => StatusColor::Primary,
            Self::InReview => StatusColor::Warning,
            Self::Deferred => StatusColor::Default,
            Self::Done => StatusColor::Success,
            Self::Rejected => StatusColor::Danger,
            Self::Hidden => StatusColor::Default,
            Self::Unknown(_) => StatusColor::Default,
        }
    }
}

impl PartialOrd for RequestStatus {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RequestStatus {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code().cmp(&other.code())
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    /// Accepts a numeric code, an option name (`in_review`) or a label (`IN_REVIEW`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u64>() {
            return Ok(Self::from_code(code));
        }
        Self::ALL
            .into_iter()
            .find(|status| {
                status.name().eq_ignore_ascii_case(trimmed)
                    || status.label().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| format!("Unknown status: {trimmed}"))
    }
}
