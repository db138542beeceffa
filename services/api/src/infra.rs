use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use slotbook::workflows::onboarding::{
    ProfessionalId, ProfessionalRecord, ProfileRepository, RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store backing the service. Each record is replaced as one
/// value under the lock, which is what keeps availability saves atomic.
#[derive(Default, Clone)]
pub(crate) struct InMemoryProfileRepository {
    records: Arc<Mutex<HashMap<ProfessionalId, ProfessionalRecord>>>,
}

impl ProfileRepository for InMemoryProfileRepository {
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
