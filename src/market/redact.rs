//! Time-gated concealment of winning numbers.

use super::types::WindowState;

/// Shown for every market that has not opened yet.
pub const HIDDEN_RESULT: &str = "***-**-***";

/// Produce the externally visible form of `raw` for the given window state.
///
/// While open, only the first three characters and the fourth (if present)
/// are revealed, e.g. `"123456"` becomes `"123-4"`. Works on characters,
/// never bytes.
pub fn redact(raw: &str, state: WindowState) -> String {
    match state {
        WindowState::BeforeOpen => HIDDEN_RESULT.to_string(),
        WindowState::Open => {
            let head: String = raw.chars().take(3).collect();
            let fourth = raw.chars().nth(3).map(String::from).unwrap_or_default();
            format!("{}-{}", head, fourth)
        }
        WindowState::AfterClose => raw.to_string(),
    }
}
