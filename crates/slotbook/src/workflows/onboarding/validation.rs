use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{
    DayAvailability, DayOfWeek, PaymentPreference, PaymentSettings, ServiceOffering, TimeRange,
};
use super::overlap;
use crate::config::SchedulingConfig;

/// Raw availability payload as sent by the wizard's second screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySubmission {
    pub week: Vec<DayAvailability>,
    #[serde(default)]
    pub day_off: Vec<DayOfWeek>,
}

/// Raw payment payload from the first screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSubmission {
    pub preference: PaymentPreference,
    #[serde(default)]
    pub pix_key: Option<String>,
}

/// Raw services payload from the third screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesSubmission {
    pub services: Vec<ServiceSubmissionItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSubmissionItem {
    pub name: String,
    pub duration_minutes: u32,
    pub price_cents: u32,
}

/// One field-scoped, human-readable validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rejection raised while turning a raw submission into domain values.
///
/// `Invalid` carries every field message at once so the wizard can render
/// inline errors in a single round trip; `MalformedWeek` marks a payload the
/// UI could never produce and short-circuits without per-field detail.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionRejection {
    #[error("availability must list each of the seven weekdays exactly once: {detail}")]
    MalformedWeek { detail: String },
    #[error("submission failed validation")]
    Invalid(Vec<FieldError>),
}

/// Policy dials backing submission validation.
#[derive(Debug, Clone)]
pub struct SchedulePolicy {
    max_ranges_per_day: usize,
}

impl SchedulePolicy {
    pub fn new(max_ranges_per_day: usize) -> Self {
        let sanitized = if max_ranges_per_day == 0 {
            SchedulingConfig::DEFAULT_MAX_RANGES_PER_DAY
        } else {
            max_ranges_per_day
        };

        Self {
            max_ranges_per_day: sanitized,
        }
    }

    pub fn max_ranges_per_day(&self) -> usize {
        self.max_ranges_per_day
    }
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self::new(SchedulingConfig::DEFAULT_MAX_RANGES_PER_DAY)
    }
}

impl From<&SchedulingConfig> for SchedulePolicy {
    fn from(config: &SchedulingConfig) -> Self {
        Self::new(config.max_ranges_per_day)
    }
}

/// Availability accepted for persistence: seven weekdays in calendar order,
/// ranges sorted by start, day-off weekdays emptied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWeek {
    pub week: Vec<DayAvailability>,
    pub day_off: BTreeSet<DayOfWeek>,
}

/// Guard converting raw wizard submissions into validated domain values.
#[derive(Debug, Clone, Default)]
pub struct ScheduleGuard {
    policy: SchedulePolicy,
}

impl ScheduleGuard {
    pub fn with_policy(policy: SchedulePolicy) -> Self {
        Self { policy }
    }

    pub fn from_config(config: &SchedulingConfig) -> Self {
        Self::with_policy(SchedulePolicy::from(config))
    }

    pub fn policy(&self) -> &SchedulePolicy {
        &self.policy
    }

    /// Validate a full-week availability payload.
    ///
    /// The weekday structure is checked first: exactly seven entries, each
    /// weekday once. Ranges on day-off weekdays are then discarded, so a day
    /// marked off never fails validation and re-enabling it starts from an
    /// empty schedule. Remaining ranges must be well-formed and disjoint per
    /// weekday; every violation is collected before returning.
    pub fn week_from_submission(
        &self,
        submission: AvailabilitySubmission,
    ) -> Result<ValidatedWeek, SubmissionRejection> {
        let AvailabilitySubmission { week, day_off } = submission;

        if week.len() != DayOfWeek::ALL.len() {
            return Err(SubmissionRejection::MalformedWeek {
                detail: format!("expected 7 entries, got {}", week.len()),
            });
        }

        let mut seen: BTreeSet<DayOfWeek> = BTreeSet::new();
        for entry in &week {
            if !seen.insert(entry.day) {
                return Err(SubmissionRejection::MalformedWeek {
                    detail: format!("weekday {} appears more than once", entry.day.label()),
                });
            }
        }

        let day_off: BTreeSet<DayOfWeek> = day_off.into_iter().collect();

        let mut errors: Vec<FieldError> = Vec::new();
        let mut validated = Vec::with_capacity(DayOfWeek::ALL.len());

        for day in DayOfWeek::ALL {
            let entry = week
                .iter()
                .find(|candidate| candidate.day == day)
                .cloned()
                .unwrap_or_else(|| DayAvailability::closed(day));

            if day_off.contains(&day) {
                validated.push(DayAvailability::closed(day));
                continue;
            }

            let mut ranges = entry.ranges;

            if ranges.len() > self.policy.max_ranges_per_day {
                errors.push(FieldError::new(
                    format!("{}.ranges", day.label()),
                    format!(
                        "at most {} time ranges are allowed per day",
                        self.policy.max_ranges_per_day
                    ),
                ));
            }

            for (position, range) in ranges.iter().enumerate() {
                if !range.is_well_formed() {
                    errors.push(FieldError::new(
                        format!("{}.ranges[{}]", day.label(), position),
                        format!("start must be earlier than end in {range}"),
                    ));
                }
            }

            // Overlap detection is only meaningful once every range occupies
            // real time.
            if ranges.iter().all(TimeRange::is_well_formed) {
                if let Some(conflict) = overlap::find_conflict(&ranges) {
                    errors.push(FieldError::new(
                        format!("{}.ranges", day.label()),
                        format!(
                            "time ranges {} and {} overlap",
                            conflict.first, conflict.second
                        ),
                    ));
                }
            }

            overlap::sort_by_start(&mut ranges);
            validated.push(DayAvailability { day, ranges });
        }

        if !errors.is_empty() {
            return Err(SubmissionRejection::Invalid(errors));
        }

        Ok(ValidatedWeek {
            week: validated,
            day_off,
        })
    }

    /// Validate the payment preference screen.
    pub fn payment_from_submission(
        &self,
        submission: PaymentSubmission,
    ) -> Result<PaymentSettings, SubmissionRejection> {
        match submission.preference {
            PaymentPreference::Pix => {
                let key = submission
                    .pix_key
                    .map(|raw| raw.trim().to_string())
                    .filter(|key| !key.is_empty());

                match key {
                    Some(key) => Ok(PaymentSettings {
                        preference: PaymentPreference::Pix,
                        pix_key: Some(key),
                    }),
                    None => Err(SubmissionRejection::Invalid(vec![FieldError::new(
                        "pix_key",
                        "a pix key is required when the pix preference is selected",
                    )])),
                }
            }
            PaymentPreference::InPerson => Ok(PaymentSettings {
                preference: PaymentPreference::InPerson,
                pix_key: None,
            }),
        }
    }

    /// Validate the services screen.
    pub fn services_from_submission(
        &self,
        submission: ServicesSubmission,
    ) -> Result<Vec<ServiceOffering>, SubmissionRejection> {
        if submission.services.is_empty() {
            return Err(SubmissionRejection::Invalid(vec![FieldError::new(
                "services",
                "at least one service is required",
            )]));
        }

        let mut errors: Vec<FieldError> = Vec::new();
        let mut offerings = Vec::with_capacity(submission.services.len());

        for (position, item) in submission.services.into_iter().enumerate() {
            let name = item.name.trim().to_string();
            if name.is_empty() {
                errors.push(FieldError::new(
                    format!("services[{position}].name"),
                    "service name must not be blank",
                ));
            }
            if item.duration_minutes == 0 {
                errors.push(FieldError::new(
                    format!("services[{position}].duration_minutes"),
                    "service duration must be at least one minute",
                ));
            }

            offerings.push(ServiceOffering {
                name,
                duration_minutes: item.duration_minutes,
                price_cents: item.price_cents,
            });
        }

        if !errors.is_empty() {
            return Err(SubmissionRejection::Invalid(errors));
        }

        Ok(offerings)
    }
}
