//! Navigation seam.
//!
//! Forced logout ends with the user on the login screen. How that happens
//! depends on the embedding host (swap the rendered view, spawn a window,
//! print a prompt), so the client only holds the seam.

/// Receives the navigate-to-login side effect of a forced logout.
///
/// Called at most once per failed request, after storage has been cleared.
pub trait Navigator: Send + Sync {
    /// Send the user to the login screen at `path`.
    fn navigate_to_login(&self, path: &str);
}
