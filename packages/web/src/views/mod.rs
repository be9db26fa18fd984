mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod dashboard;
pub use dashboard::Dashboard;

mod profile;
pub use profile::Profile;

/// Normalize an optional form field: blank input means "not provided".
pub(crate) fn optional_field(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::optional_field;

    #[test]
    fn blank_input_is_not_provided() {
        assert_eq!(optional_field(""), None);
        assert_eq!(optional_field("   "), None);
        assert_eq!(
            optional_field(" data:image/png;base64,iVBOR "),
            Some("data:image/png;base64,iVBOR".to_string())
        );
    }
}
