use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveTime;
use serde_json::Value;

use crate::workflows::onboarding::domain::{
    DayAvailability, DayOfWeek, PaymentPreference, ProfessionalId, TimeRange,
};
use crate::workflows::onboarding::repository::{
    ProfessionalRecord, ProfileRepository, RepositoryError,
};
use crate::workflows::onboarding::service::{OnboardingService, RegistrationRequest};
use crate::workflows::onboarding::validation::{
    AvailabilitySubmission, PaymentSubmission, ScheduleGuard, ServiceSubmissionItem,
    ServicesSubmission,
};

pub(super) fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid clock time")
}

pub(super) fn range(start: (u32, u32), end: (u32, u32)) -> TimeRange {
    TimeRange::new(time(start.0, start.1), time(end.0, end.1))
}

/// Seven weekday entries: weekday mornings open, weekend closed.
pub(super) fn working_week() -> Vec<DayAvailability> {
    DayOfWeek::ALL
        .into_iter()
        .map(|day| match day {
            DayOfWeek::Sunday | DayOfWeek::Saturday => DayAvailability::closed(day),
            _ => DayAvailability {
                day,
                ranges: vec![range((9, 0), (12, 0)), range((13, 0), (18, 0))],
            },
        })
        .collect()
}

pub(super) fn availability_submission() -> AvailabilitySubmission {
    AvailabilitySubmission {
        week: working_week(),
        day_off: vec![DayOfWeek::Sunday],
    }
}

pub(super) fn payment_submission() -> PaymentSubmission {
    PaymentSubmission {
        preference: PaymentPreference::Pix,
        pix_key: Some("pro@example.com".to_string()),
    }
}

pub(super) fn services_submission() -> ServicesSubmission {
    ServicesSubmission {
        services: vec![
            ServiceSubmissionItem {
                name: "Haircut".to_string(),
                duration_minutes: 30,
                price_cents: 4500,
            },
            ServiceSubmissionItem {
                name: "Beard trim".to_string(),
                duration_minutes: 15,
                price_cents: 2000,
            },
        ],
    }
}

pub(super) fn build_service() -> (OnboardingService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = OnboardingService::new(repository.clone(), ScheduleGuard::default());
    (service, repository)
}

/// Register a fresh account and hand back its id for the wizard steps.
pub(super) fn register(
    service: &OnboardingService<MemoryRepository>,
    email: &str,
) -> ProfessionalId {
    service
        .register(RegistrationRequest {
            email: email.to_string(),
        })
        .expect("registration succeeds")
        .profile
        .id
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<ProfessionalId, ProfessionalRecord>>>,
}

impl ProfileRepository for MemoryRepository {
    fn insert(&self, record: ProfessionalRecord) -> Result<ProfessionalRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.profile.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ProfessionalRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.profile.id) {
            guard.insert(record.profile.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ProfessionalId) -> Result<Option<ProfessionalRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn fetch_by_email(
        &self,
        email: &str,
    ) -> Result<Option<ProfessionalRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.profile.email == email)
            .cloned())
    }
}

/// Repository double that fails every call, for 500-path coverage.
pub(super) struct UnavailableRepository;

impl ProfileRepository for UnavailableRepository {
    fn insert(&self, _record: ProfessionalRecord) -> Result<ProfessionalRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _record: ProfessionalRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &ProfessionalId) -> Result<Option<ProfessionalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch_by_email(
        &self,
        _email: &str,
    ) -> Result<Option<ProfessionalRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}
