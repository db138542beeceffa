use serde::{Deserialize, Serialize};

/// Onboarding progression. The counter only moves forward: once a step is
/// behind the professional, resubmitting it edits data without touching the
/// counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    PaymentPreference,
    Availability,
    Services,
    Complete,
}

impl OnboardingStep {
    pub const fn index(self) -> u8 {
        match self {
            OnboardingStep::PaymentPreference => 0,
            OnboardingStep::Availability => 1,
            OnboardingStep::Services => 2,
            OnboardingStep::Complete => 3,
        }
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(OnboardingStep::PaymentPreference),
            1 => Some(OnboardingStep::Availability),
            2 => Some(OnboardingStep::Services),
            3 => Some(OnboardingStep::Complete),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            OnboardingStep::PaymentPreference => "payment_preference",
            OnboardingStep::Availability => "availability",
            OnboardingStep::Services => "services",
            OnboardingStep::Complete => "complete",
        }
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, OnboardingStep::Complete)
    }

    pub const fn next(self) -> Self {
        match self {
            OnboardingStep::PaymentPreference => OnboardingStep::Availability,
            OnboardingStep::Availability => OnboardingStep::Services,
            OnboardingStep::Services | OnboardingStep::Complete => OnboardingStep::Complete,
        }
    }

    /// Counter transition after a successful save of `submitted`'s data.
    ///
    /// Advances only when the save completes the step currently pending;
    /// anything else is a plain edit and leaves the counter where it is.
    #[must_use]
    pub fn after_submission(self, submitted: OnboardingStep) -> Self {
        if self == submitted {
            self.next()
        } else {
            self
        }
    }

    /// Route suffix under a professional's base path, used to point clients
    /// at the screen that still needs input.
    pub const fn route_suffix(self) -> &'static str {
        match self {
            OnboardingStep::PaymentPreference => "onboarding/payment",
            OnboardingStep::Availability => "onboarding/availability",
            OnboardingStep::Services => "onboarding/services",
            OnboardingStep::Complete => "dashboard",
        }
    }
}
