use crate::workflows::onboarding::steps::OnboardingStep;

#[test]
fn indices_round_trip() {
    for index in 0..=3 {
        let step = OnboardingStep::from_index(index).expect("valid index");
        assert_eq!(step.index(), index);
    }
    assert!(OnboardingStep::from_index(4).is_none());
}

#[test]
fn in_order_submission_advances() {
    let step = OnboardingStep::PaymentPreference;
    let step = step.after_submission(OnboardingStep::PaymentPreference);
    assert_eq!(step, OnboardingStep::Availability);
    let step = step.after_submission(OnboardingStep::Availability);
    assert_eq!(step, OnboardingStep::Services);
    let step = step.after_submission(OnboardingStep::Services);
    assert_eq!(step, OnboardingStep::Complete);
}

#[test]
fn out_of_order_submission_leaves_counter_alone() {
    let step = OnboardingStep::PaymentPreference;
    assert_eq!(
        step.after_submission(OnboardingStep::Availability),
        OnboardingStep::PaymentPreference
    );
    assert_eq!(
        step.after_submission(OnboardingStep::Services),
        OnboardingStep::PaymentPreference
    );
}

#[test]
fn counter_never_decreases_after_completion() {
    let step = OnboardingStep::Complete;
    assert_eq!(
        step.after_submission(OnboardingStep::PaymentPreference),
        OnboardingStep::Complete
    );
    assert_eq!(
        step.after_submission(OnboardingStep::Availability),
        OnboardingStep::Complete
    );
}

#[test]
fn complete_is_terminal() {
    assert_eq!(OnboardingStep::Complete.next(), OnboardingStep::Complete);
    assert!(OnboardingStep::Complete.is_complete());
    assert!(!OnboardingStep::Services.is_complete());
}

#[test]
fn route_suffixes_point_at_each_screen() {
    assert_eq!(
        OnboardingStep::PaymentPreference.route_suffix(),
        "onboarding/payment"
    );
    assert_eq!(
        OnboardingStep::Availability.route_suffix(),
        "onboarding/availability"
    );
    assert_eq!(
        OnboardingStep::Services.route_suffix(),
        "onboarding/services"
    );
    assert_eq!(OnboardingStep::Complete.route_suffix(), "dashboard");
}
