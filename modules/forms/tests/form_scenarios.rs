//! Form state transitions against the login and registration schemas.

use std::sync::Arc;

use forms::domain::catalog::{login_schema, registration_schema};
use forms::domain::error::DomainError;
use forms::domain::state::SubmitRejection;
use forms::model::FormKind;
use forms::FormState;
use proptest::prelude::*;

fn login() -> FormState {
    FormState::new(Arc::new(login_schema().unwrap()))
}

fn register() -> FormState {
    FormState::new(Arc::new(registration_schema().unwrap()))
}

fn filled_registration() -> FormState {
    [
        ("userType", "farmer"),
        ("fullName", "Ravi Kumar"),
        ("email", "ravi@soil.gov.in"),
        ("mobile", "9876543210"),
        ("password", "secret1"),
        ("confirmPassword", "secret1"),
        ("state", "Karnataka"),
        ("district", "Mysuru"),
    ]
    .into_iter()
    .try_fold(register(), |s, (k, v)| s.set_field(k, v))
    .unwrap()
}

#[test]
fn mismatched_confirmation_blocks_submit() {
    let state = register()
        .set_field("password", "abcdef")
        .unwrap()
        .set_field("confirmPassword", "abcxyz")
        .unwrap();

    assert_eq!(state.errors()["confirmPassword"], "Passwords must match");
    assert!(!state.is_submittable());
}

#[test]
fn editing_password_revalidates_confirmation() {
    let state = register()
        .set_field("password", "abcdef")
        .unwrap()
        .set_field("confirmPassword", "abcdef")
        .unwrap();
    assert!(!state.errors().contains_key("confirmPassword"));

    let state = state.set_field("password", "abcdeg").unwrap();
    assert_eq!(state.errors()["confirmPassword"], "Passwords must match");

    let state = state.set_field("password", "abcdef").unwrap();
    assert!(!state.errors().contains_key("confirmPassword"));
}

#[test]
fn mobile_pattern_scenarios() {
    let state = register().set_field("mobile", "12345").unwrap();
    assert_eq!(state.errors()["mobile"], "Enter a valid 10-digit mobile number");

    let state = state.set_field("mobile", "9876543210").unwrap();
    assert!(!state.errors().contains_key("mobile"));
}

#[test]
fn untouched_fields_are_validated_on_submit() {
    let state = register().set_field("fullName", "Ravi Kumar").unwrap();
    assert!(state.visible_errors().is_empty());

    let blocked = state.submit().unwrap_err();
    assert_eq!(blocked.errors["email"], "Email is required");
    assert_eq!(blocked.errors["district"], "District is required");
    assert!(!blocked.errors.contains_key("fullName"));
    assert_eq!(blocked.errors.len(), 7);
}

#[test]
fn errors_show_for_touched_fields_only() {
    let state = register().blur("email").unwrap();
    let visible = state.visible_errors();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible["email"], "Email is required");

    let state = state.touch_all();
    assert_eq!(state.visible_errors().len(), 8);
}

#[test]
fn complete_registration_submits_all_values() {
    let state = filled_registration();
    assert!(state.is_submittable());

    let submitted = state.submit().unwrap();
    assert_eq!(submitted.kind, FormKind::Register);
    assert_eq!(submitted.values["district"], "Mysuru");
    assert_eq!(submitted.values.len(), 8);
}

#[test]
fn unknown_state_is_rejected() {
    let state = filled_registration().set_field("state", "Atlantis").unwrap();
    assert_eq!(state.errors()["state"], "State is required");
}

#[test]
fn login_requires_changes_and_valid_values() {
    let state = login();
    assert!(!state.is_dirty());
    assert!(!state.is_submittable());

    let state = state
        .set_field("userType", "state_user")
        .unwrap()
        .set_field("email", "officer@state.gov.in")
        .unwrap()
        .set_field("password", "abc")
        .unwrap();
    assert_eq!(
        state.errors()["password"],
        "Password must be at least 4 characters"
    );
    assert!(!state.is_submittable());

    let state = state.set_field("password", "abcd").unwrap();
    assert!(state.is_dirty());
    assert!(state.is_submittable());
}

#[test]
fn login_rejects_bad_email_and_user_type() {
    let state = login()
        .set_field("email", "officer@state")
        .unwrap()
        .set_field("userType", "farmer")
        .unwrap();
    assert_eq!(state.errors()["email"], "Invalid email format");
    assert_eq!(state.errors()["userType"], "User type is required");
}

#[test]
fn unknown_field_is_an_error() {
    let err = login().set_field("otp", "1234").unwrap_err();
    assert_eq!(
        err,
        DomainError::UnknownField {
            form: FormKind::Login,
            field: "otp".into()
        }
    );
}

#[test]
fn second_submit_while_in_flight_is_rejected() {
    let (state, begun) = filled_registration().begin_submit();
    assert!(begun.is_ok());
    assert!(state.is_submitting());
    assert!(!state.is_submittable());

    let (state, again) = state.begin_submit();
    assert_eq!(again.unwrap_err(), SubmitRejection::InFlight);

    let state = state.finish_submit(forms::model::StatusMessage::error("failed"));
    assert!(!state.is_submitting());
    assert_eq!(state.value("fullName"), Some("Ravi Kumar"));
}

#[test]
fn blocked_begin_touches_everything() {
    let (state, begun) = register().begin_submit();
    assert!(matches!(begun, Err(SubmitRejection::Blocked(ref b)) if b.errors.len() == 8));
    assert!(!state.is_submitting());
    assert!(state.is_touched("mobile"));
}

proptest! {
    #[test]
    fn mobile_accepts_exactly_ten_digits_from_six(lead in 0u8..10, rest in "[0-9]{9}") {
        let number = format!("{}{}", lead, rest);
        let state = register().set_field("mobile", number).unwrap();
        prop_assert_eq!(state.errors().contains_key("mobile"), lead < 6);
    }

    #[test]
    fn submittable_iff_no_errors(password in "[a-z]{0,8}", confirm in "[a-z]{0,8}") {
        let state = filled_registration()
            .set_field("password", password.clone())
            .unwrap()
            .set_field("confirmPassword", confirm.clone())
            .unwrap();
        prop_assert_eq!(state.is_submittable(), state.validate_all().is_empty());
        prop_assert_eq!(
            state.is_submittable(),
            password.len() >= 6 && password == confirm
        );
    }
}
