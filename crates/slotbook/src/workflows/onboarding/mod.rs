//! Onboarding wizard for independent professionals: payment preference,
//! weekly availability (with day-off reconciliation and overlap detection),
//! and the service catalogue, gated by a forward-only step counter.

pub mod domain;
pub mod overlap;
pub mod repository;
pub mod router;
pub mod service;
pub mod steps;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    empty_week, DayAvailability, DayOfWeek, PaymentPreference, PaymentSettings, ProfessionalId,
    ProfessionalProfile, ServiceOffering, TimeRange,
};
pub use overlap::{find_conflict, OverlapConflict};
pub use repository::{ProfessionalRecord, ProfileRepository, ProfileView, RepositoryError};
pub use router::onboarding_router;
pub use service::{OnboardingService, OnboardingServiceError, RegistrationRequest};
pub use steps::OnboardingStep;
pub use validation::{
    AvailabilitySubmission, FieldError, PaymentSubmission, ScheduleGuard, SchedulePolicy,
    ServiceSubmissionItem, ServicesSubmission, SubmissionRejection, ValidatedWeek,
};
