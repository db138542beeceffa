use crate::infra::InMemoryProfileRepository;
use chrono::NaiveTime;
use clap::Args;
use std::sync::Arc;

use slotbook::error::AppError;
use slotbook::workflows::onboarding::{
    AvailabilitySubmission, DayAvailability, DayOfWeek, OnboardingService, PaymentPreference,
    PaymentSubmission, RegistrationRequest, ScheduleGuard, ServiceSubmissionItem,
    ServicesSubmission, TimeRange,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Email for the sample professional
    #[arg(long, default_value = "demo@slotbook.dev")]
    pub(crate) email: String,
    /// Weekday to mark as a day off (repeatable); defaults to sunday
    #[arg(long = "day-off", value_parser = parse_day)]
    pub(crate) day_off: Vec<DayOfWeek>,
    /// Collect payment at the appointment instead of up-front Pix
    #[arg(long)]
    pub(crate) in_person: bool,
}

fn parse_day(raw: &str) -> Result<DayOfWeek, String> {
    DayOfWeek::ALL
        .into_iter()
        .find(|day| day.label() == raw.trim().to_ascii_lowercase())
        .ok_or_else(|| format!("unknown weekday '{raw}'"))
}

fn clock(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn sample_week() -> Vec<DayAvailability> {
    DayOfWeek::ALL
        .into_iter()
        .map(|day| match day {
            DayOfWeek::Sunday | DayOfWeek::Saturday => DayAvailability::closed(day),
            _ => DayAvailability {
                day,
                ranges: vec![
                    TimeRange::new(clock(9, 0), clock(12, 0)),
                    TimeRange::new(clock(13, 0), clock(18, 0)),
                ],
            },
        })
        .collect()
}

/// Drive a sample professional through the full wizard and print each stop,
/// mirroring what the HTTP surface returns.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        email,
        day_off,
        in_person,
    } = args;

    let day_off = if day_off.is_empty() {
        vec![DayOfWeek::Sunday]
    } else {
        day_off
    };

    let repository = Arc::new(InMemoryProfileRepository::default());
    let service = OnboardingService::new(repository, ScheduleGuard::default());

    let record = service.register(RegistrationRequest { email })?;
    let id = record.profile.id.clone();
    println!("registered {id} at step {}", record.profile.step.index());

    let payment = if in_person {
        PaymentSubmission {
            preference: PaymentPreference::InPerson,
            pix_key: None,
        }
    } else {
        PaymentSubmission {
            preference: PaymentPreference::Pix,
            pix_key: Some("demo@slotbook.dev".to_string()),
        }
    };
    let record = service.submit_payment_preference(&id, payment)?;
    println!("payment preference saved, step {}", record.profile.step.index());

    let record = service.submit_availability(
        &id,
        AvailabilitySubmission {
            week: sample_week(),
            day_off,
        },
    )?;
    println!("availability saved, step {}", record.profile.step.index());

    let record = service.submit_services(
        &id,
        ServicesSubmission {
            services: vec![
                ServiceSubmissionItem {
                    name: "Consultation".to_string(),
                    duration_minutes: 50,
                    price_cents: 18000,
                },
                ServiceSubmissionItem {
                    name: "Follow-up".to_string(),
                    duration_minutes: 25,
                    price_cents: 9000,
                },
            ],
        },
    )?;
    println!("services saved, step {}", record.profile.step.index());

    let view = service.profile(&id)?.profile_view();
    match serde_json::to_string_pretty(&view) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => println!("profile serialization failed: {err}"),
    }

    Ok(())
}
