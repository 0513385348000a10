//! Global configuration for input parsing.
//!
//! Process-wide settings are set once by the binary at startup and read by
//! the source adapter. The merge engine never reads them.

use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for lenient list parsing.
///
/// When enabled, a list line ends at its first token that is not a valid
/// integer and the remainder of the line is ignored. When disabled (the
/// default), such a token is a parse error.
static LENIENT_PARSING: AtomicBool = AtomicBool::new(false);

/// Enable or disable lenient parsing.
///
/// # Example
///
/// ```
/// use nway_merge::config;
///
/// config::set_lenient(true);
/// let lists = nway_merge::parse_sources("1\n1 2 oops 3\n").unwrap();
/// assert_eq!(lists, vec![vec![1, 2]]);
/// config::set_lenient(false);
/// ```
#[inline]
pub fn set_lenient(enabled: bool) {
    LENIENT_PARSING.store(enabled, Ordering::Release);
}

/// Check if lenient parsing is enabled.
#[inline]
pub fn is_lenient() -> bool {
    LENIENT_PARSING.load(Ordering::Acquire)
}
