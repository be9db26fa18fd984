//! Confirmation prompt for destructive actions.

/// Ask the user to confirm before a destructive request is issued.
/// Uses the browser's native confirm dialog on web; always confirms
/// elsewhere (no interactive prompt exists off-web).
pub fn confirm_action(message: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()
            .and_then(|window| window.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
        true
    }
}
