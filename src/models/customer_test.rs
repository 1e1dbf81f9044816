use super::*;
use serde_json::json;

fn form(value: serde_json::Value) -> CustomerForm {
    serde_json::from_value(value).unwrap()
}

#[test]
fn blank_email_is_treated_as_absent() {
    let f = form(json!({ "name": "Acme", "email": "" }));
    assert_eq!(f.email, None);
    assert!(f.validate().is_ok());

    let f = form(json!({ "name": "Acme", "email": "   " }));
    assert_eq!(f.email, None);
}

#[test]
fn missing_email_is_fine() {
    let f = form(json!({ "name": "Acme" }));
    assert_eq!(f.email, None);
    assert!(f.validate().is_ok());
}

#[test]
fn malformed_email_is_still_rejected() {
    let f = form(json!({ "name": "Acme", "email": "acme" }));
    let errors = f.validate().unwrap_err();
    assert!(errors.field_errors().contains_key("email"));
}
