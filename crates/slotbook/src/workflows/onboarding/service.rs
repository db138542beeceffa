use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{ProfessionalId, ProfessionalProfile};
use super::repository::{ProfessionalRecord, ProfileRepository, RepositoryError};
use super::steps::OnboardingStep;
use super::validation::{
    AvailabilitySubmission, FieldError, PaymentSubmission, ScheduleGuard, ServicesSubmission,
    SubmissionRejection, ValidatedWeek,
};

/// Registration payload for a new professional account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
}

/// Service facade for the onboarding wizard: validates each screen's payload
/// through the guard, replaces the owning record wholesale, and advances the
/// step counter when the save completes the pending step.
pub struct OnboardingService<R> {
    guard: ScheduleGuard,
    repository: Arc<R>,
}

static PROFESSIONAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_professional_id() -> ProfessionalId {
    let id = PROFESSIONAL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ProfessionalId(format!("pro-{id:06}"))
}

impl<R> OnboardingService<R>
where
    R: ProfileRepository + 'static,
{
    pub fn new(repository: Arc<R>, guard: ScheduleGuard) -> Self {
        Self { guard, repository }
    }

    pub fn guard(&self) -> &ScheduleGuard {
        &self.guard
    }

    /// Create a fresh account at step zero.
    pub fn register(
        &self,
        request: RegistrationRequest,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        let email = request.email.trim().to_ascii_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(SubmissionRejection::Invalid(vec![FieldError {
                field: "email".to_string(),
                message: "a valid email address is required".to_string(),
            }])
            .into());
        }

        if self.repository.fetch_by_email(&email)?.is_some() {
            return Err(RepositoryError::Conflict.into());
        }

        let profile = ProfessionalProfile::new(next_professional_id(), email);
        let record = ProfessionalRecord::new(profile);
        let stored = self.repository.insert(record)?;
        Ok(stored)
    }

    /// Save the payment preference screen.
    pub fn submit_payment_preference(
        &self,
        id: &ProfessionalId,
        submission: PaymentSubmission,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        let settings = self.guard.payment_from_submission(submission)?;
        let mut record = self.fetch_record(id)?;

        record.profile.payment = Some(settings);
        record.profile.step = record
            .profile
            .step
            .after_submission(OnboardingStep::PaymentPreference);

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Save the availability screen: full-week replace plus day-off
    /// reconciliation, all in one repository update.
    pub fn submit_availability(
        &self,
        id: &ProfessionalId,
        submission: AvailabilitySubmission,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        let ValidatedWeek { week, day_off } = self.guard.week_from_submission(submission)?;
        let mut record = self.fetch_record(id)?;

        record.availability = week;
        record.profile.day_off = day_off;
        record.profile.step = record
            .profile
            .step
            .after_submission(OnboardingStep::Availability);

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Save the services screen, replacing the prior catalogue wholesale.
    pub fn submit_services(
        &self,
        id: &ProfessionalId,
        submission: ServicesSubmission,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        let services = self.guard.services_from_submission(submission)?;
        let mut record = self.fetch_record(id)?;

        record.services = services;
        record.profile.step = record.profile.step.after_submission(OnboardingStep::Services);

        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Toggle vacation mode; independent of the onboarding counter.
    pub fn set_vacation_mode(
        &self,
        id: &ProfessionalId,
        enabled: bool,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        let mut record = self.fetch_record(id)?;
        record.profile.vacation_mode = enabled;
        self.repository.update(record.clone())?;
        Ok(record)
    }

    /// Fetch the full profile used to hydrate the wizard and dashboard.
    pub fn profile(
        &self,
        id: &ProfessionalId,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        self.fetch_record(id)
    }

    fn fetch_record(
        &self,
        id: &ProfessionalId,
    ) -> Result<ProfessionalRecord, OnboardingServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

/// Error raised by the onboarding service.
#[derive(Debug, thiserror::Error)]
pub enum OnboardingServiceError {
    #[error(transparent)]
    Rejected(#[from] SubmissionRejection),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
