//! Login and registration forms of the dashboard.

use std::sync::Arc;

use crate::contract::model::FormKind;
use crate::domain::error::DomainError;
use crate::domain::rules::{Rule, MOBILE_RE};
use crate::domain::schema::{FieldSpec, FormSchema};

pub const LOGIN_USER_TYPES: [&str; 6] = [
    "central_user",
    "scheme_admin",
    "state_user",
    "district_user",
    "stl",
    "supervisor",
];

pub const REGISTER_USER_TYPES: [&str; 4] =
    ["farmer", "state_official", "district_official", "lab_technician"];

/// States offered at registration, each with its districts.
pub static STATE_DISTRICTS: [(&str, [&str; 4]); 4] = [
    ("Karnataka", ["Bengaluru", "Mysuru", "Hubballi", "Mangaluru"]),
    ("Maharashtra", ["Mumbai", "Pune", "Nagpur", "Nashik"]),
    ("TamilNadu", ["Chennai", "Coimbatore", "Madurai", "Tiruchirappalli"]),
    ("Gujarat", ["Ahmedabad", "Surat", "Vadodara", "Rajkot"]),
];

pub fn districts_for(state: &str) -> Option<&'static [&'static str]> {
    STATE_DISTRICTS
        .iter()
        .find(|(s, _)| *s == state)
        .map(|(_, districts)| &districts[..])
}

pub fn login_schema() -> Result<FormSchema, DomainError> {
    FormSchema::builder(FormKind::Login)
        .requires_dirty(true)
        .field(
            FieldSpec::new("userType", "User Type")
                .rule(Rule::required("User type is required"))
                .rule(Rule::one_of(LOGIN_USER_TYPES, "User type is required")),
        )
        .field(
            FieldSpec::new("email", "Email")
                .rule(Rule::required("Email is required"))
                .rule(Rule::email("Invalid email format")),
        )
        .field(
            FieldSpec::new("password", "Password")
                .rule(Rule::required("Password is required"))
                .rule(Rule::min_length(4, "Password must be at least 4 characters")),
        )
        .build()
}

pub fn registration_schema() -> Result<FormSchema, DomainError> {
    FormSchema::builder(FormKind::Register)
        .field(
            FieldSpec::new("userType", "User Type")
                .rule(Rule::required("User type is required"))
                .rule(Rule::one_of(REGISTER_USER_TYPES, "User type is required")),
        )
        .field(
            FieldSpec::new("fullName", "Full Name")
                .rule(Rule::required("Full name is required"))
                .rule(Rule::min_length(3, "Name must be at least 3 characters")),
        )
        .field(
            FieldSpec::new("email", "Email")
                .rule(Rule::required("Email is required"))
                .rule(Rule::email("Invalid email format")),
        )
        .field(
            FieldSpec::new("mobile", "Mobile Number")
                .rule(Rule::required("Mobile number is required"))
                .rule(Rule::pattern(
                    MOBILE_RE.clone(),
                    "Enter a valid 10-digit mobile number",
                )),
        )
        .field(
            FieldSpec::new("password", "Password")
                .rule(Rule::required("Password is required"))
                .rule(Rule::min_length(6, "Password must be at least 6 characters")),
        )
        .field(
            FieldSpec::new("confirmPassword", "Confirm Password")
                .rule(Rule::required("Confirm Password is required"))
                .rule(Rule::equals_field("password", "Passwords must match")),
        )
        .field(
            FieldSpec::new("state", "State")
                .rule(Rule::required("State is required"))
                .rule(Rule::one_of(
                    STATE_DISTRICTS.iter().map(|(s, _)| *s),
                    "State is required",
                )),
        )
        .field(FieldSpec::new("district", "District").rule(Rule::required("District is required")))
        .build()
}

pub fn schema_for(kind: FormKind) -> Result<Arc<FormSchema>, DomainError> {
    let schema = match kind {
        FormKind::Login => login_schema()?,
        FormKind::Register => registration_schema()?,
    };
    Ok(Arc::new(schema))
}
