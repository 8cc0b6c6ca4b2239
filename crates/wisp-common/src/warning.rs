//! Pipeline warnings with colored terminal output.
//!
//! The tokenizer and tree builder never fail on document text; instead they
//! report what they tolerated (stray close tags, truncated markup) here.
//! Messages are deduplicated so a page full of the same mistake prints once.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// A poisoned lock only means another thread panicked mid-insert; the set
/// itself is still usable.
fn warned() -> MutexGuard<'static, Option<HashSet<String>>> {
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about tolerated input (prints once per unique message)
///
/// # Example
/// ```ignore
/// warn_once("HTML Parser", "ignored stray close tag </b>");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_print = warned()
        .get_or_insert_with(HashSet::new)
        .insert(key(component, message));

    if should_print {
        eprintln!("{YELLOW}[Wisp {component}] ⚠ {message}{RESET}");
    }
}

/// Returns true if this exact warning has been reported since the last
/// [`clear_warnings`].
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned()
        .as_ref()
        .is_some_and(|set| set.contains(&key(component, message)))
}

/// Clear all recorded warnings (call when loading a new page)
pub fn clear_warnings() {
    if let Some(set) = warned().as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_is_recorded() {
        warn_once("Test", "recorded once");
        assert!(has_warned("Test", "recorded once"));
        assert!(!has_warned("Test", "never reported"));
    }

    #[test]
    fn test_components_are_distinct_keys() {
        warn_once("Tokenizer", "same message");
        assert!(has_warned("Tokenizer", "same message"));
        assert!(!has_warned("Layout", "same message"));
    }
}
