//! Drives a login form through the scripted host and prints each pass.
//!
//! ```bash
//! cargo run -p ferroform --example login
//! ```

use ferroform::harness::{drive, ScriptedHost};
use ferroform::schema::{Property, PropertyFormat, Schema};
use ferroform::validate::{check_field, MinLengthValidator, RequiredValidator};
use ferroform::{FormModel, FormOptions, FormState, Violation};
use serde_json::{Map, Value};

#[derive(Debug)]
struct Login {
    username: String,
    password: String,
}

impl FormModel for Login {
    fn schema() -> Schema {
        Schema::new("Login")
            .property(
                "username",
                Property::string("Username")
                    .description("At least 3 characters")
                    .min_length(3),
            )
            .property(
                "password",
                Property::string("Password")
                    .format(PropertyFormat::Password)
                    .min_length(6),
            )
            .required("username")
            .required("password")
    }

    fn validate(values: &Map<String, Value>) -> Result<Self, Vec<Violation>> {
        let mut violations = Vec::new();
        let required = RequiredValidator::new();
        let min_username = MinLengthValidator::new(3);
        let min_password = MinLengthValidator::new(6);
        check_field(&mut violations, values, "username", &[&required, &min_username]);
        check_field(&mut violations, values, "password", &[&required, &min_password]);

        if violations.is_empty() {
            Ok(Self {
                username: values
                    .get("username")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                password: values
                    .get("password")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            })
        } else {
            Err(violations)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = ScriptedHost::new();
    let mut state = FormState::new();
    let options = FormOptions::default();

    // First attempt: the username is too short.
    host.set("login_username", "ab");
    host.set("login_password", "secret1");
    host.press("login_submit");
    let result = drive::<Login>(&mut host, &mut state, &options, 4)?;
    println!("first submit  -> {result:?}");
    for message in host.errors_for("login_username") {
        println!("username says -> {message}");
    }

    // Fix it and resubmit; the password edit survives untouched.
    host.set("login_username", "ada");
    host.press("login_submit");
    let result = drive::<Login>(&mut host, &mut state, &options, 4)?;
    println!("second submit -> {result:?}");

    Ok(())
}
