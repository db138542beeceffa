use serde::{Deserialize, Serialize};

use super::domain::{
    empty_week, DayAvailability, DayOfWeek, PaymentSettings, ProfessionalId, ProfessionalProfile,
    ServiceOffering,
};
use super::steps::OnboardingStep;

/// Everything persisted for one professional. The record is the unit of
/// atomic replacement: `ProfileRepository::update` swaps the whole value in
/// one step, so a failed save never leaves availability or services half
/// written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalRecord {
    pub profile: ProfessionalProfile,
    pub availability: Vec<DayAvailability>,
    pub services: Vec<ServiceOffering>,
}

impl ProfessionalRecord {
    pub fn new(profile: ProfessionalProfile) -> Self {
        Self {
            profile,
            availability: empty_week(),
            services: Vec::new(),
        }
    }

    pub fn profile_view(&self) -> ProfileView {
        ProfileView {
            id: self.profile.id.clone(),
            email: self.profile.email.clone(),
            payment: self.profile.payment.clone(),
            day_off: self.profile.day_off.iter().copied().collect(),
            configuration_step: self.profile.step.index(),
            vacation_mode: self.profile.vacation_mode,
            availability: self.availability.clone(),
            services: self.services.clone(),
        }
    }
}

/// Storage abstraction so the service module can be exercised in isolation.
/// `update` must replace the stored record atomically.
pub trait ProfileRepository: Send + Sync {
    fn insert(&self, record: ProfessionalRecord) -> Result<ProfessionalRecord, RepositoryError>;
    fn update(&self, record: ProfessionalRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ProfessionalId) -> Result<Option<ProfessionalRecord>, RepositoryError>;
    fn fetch_by_email(&self, email: &str)
        -> Result<Option<ProfessionalRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Full profile shape returned by the read endpoint, hydrating every wizard
/// screen in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub id: ProfessionalId,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentSettings>,
    pub day_off: Vec<DayOfWeek>,
    pub configuration_step: u8,
    pub vacation_mode: bool,
    pub availability: Vec<DayAvailability>,
    pub services: Vec<ServiceOffering>,
}

impl ProfileView {
    pub fn step(&self) -> Option<OnboardingStep> {
        OnboardingStep::from_index(self.configuration_step)
    }
}
