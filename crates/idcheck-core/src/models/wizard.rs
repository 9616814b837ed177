//! Steps of the capture-and-verify wizard.

use serde::{Deserialize, Serialize};

/// Wizard step, in the order the user walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    FrontId = 1,
    BackId = 2,
    Selfie = 3,
    Verify = 4,
    Complete = 5,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        Self::FrontId,
        Self::BackId,
        Self::Selfie,
        Self::Verify,
        Self::Complete,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::FrontId => "Front ID",
            Self::BackId => "Back ID",
            Self::Selfie => "Selfie",
            Self::Verify => "Verify",
            Self::Complete => "Complete",
        }
    }

    /// Width of the progress line, 0 on the first step and 100 on the last.
    pub fn progress_percent(self) -> u8 {
        (self.number() - 1) * 25
    }

    pub fn next(self) -> Option<Self> {
        match self {
            Self::FrontId => Some(Self::BackId),
            Self::BackId => Some(Self::Selfie),
            Self::Selfie => Some(Self::Verify),
            Self::Verify => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Whether `other` is already done when the wizard sits on `self`.
    pub fn has_passed(self, other: WizardStep) -> bool {
        self > other
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}
