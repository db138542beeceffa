use std::collections::BTreeSet;
use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for professional accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfessionalId(pub String);

impl fmt::Display for ProfessionalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Weekdays in calendar order, Sunday first to match the booking surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "sunday",
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        }
    }
}

/// Serde codec for clock times in `HH:MM` form.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(raw.trim(), FORMAT).map_err(|err| {
            serde::de::Error::custom(format!("failed to parse '{raw}' as HH:MM ({err})"))
        })
    }
}

/// A half-open booking window within a single weekday.
///
/// Two ranges sharing a boundary (`a.end == b.start`) do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

impl TimeRange {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub fn start_minutes(&self) -> u32 {
        self.start.hour() * 60 + self.start.minute()
    }

    pub fn end_minutes(&self) -> u32 {
        self.end.hour() * 60 + self.end.minute()
    }

    /// A range must occupy at least one minute; `start >= end` is malformed.
    pub fn is_well_formed(&self) -> bool {
        self.start_minutes() < self.end_minutes()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// Bookable windows for one weekday. Replaced wholesale on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub day: DayOfWeek,
    pub ranges: Vec<TimeRange>,
}

impl DayAvailability {
    pub fn closed(day: DayOfWeek) -> Self {
        Self {
            day,
            ranges: Vec::new(),
        }
    }
}

/// An empty schedule covering all seven weekdays in calendar order.
pub fn empty_week() -> Vec<DayAvailability> {
    DayOfWeek::ALL.into_iter().map(DayAvailability::closed).collect()
}

/// How the professional collects payment from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPreference {
    /// Clients pay at the appointment.
    InPerson,
    /// Clients pay up front through a Pix transfer.
    Pix,
}

impl PaymentPreference {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentPreference::InPerson => "in_person",
            PaymentPreference::Pix => "pix",
        }
    }
}

/// Validated payment configuration; `pix_key` is present iff preference is Pix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSettings {
    pub preference: PaymentPreference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pix_key: Option<String>,
}

/// A bookable service with its duration and price in integer cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub name: String,
    pub duration_minutes: u32,
    pub price_cents: u32,
}

/// Account-level state for one professional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    pub id: ProfessionalId,
    pub email: String,
    pub payment: Option<PaymentSettings>,
    pub day_off: BTreeSet<DayOfWeek>,
    pub step: super::steps::OnboardingStep,
    pub vacation_mode: bool,
}

impl ProfessionalProfile {
    pub fn new(id: ProfessionalId, email: String) -> Self {
        Self {
            id,
            email,
            payment: None,
            day_off: BTreeSet::new(),
            step: super::steps::OnboardingStep::PaymentPreference,
            vacation_mode: false,
        }
    }
}
