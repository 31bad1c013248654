//! # Taskdeck Client
//!
//! Authorized HTTP client and typed API services for the Taskdeck todo
//! application. Sits on top of [`taskdeck_session`]: every outbound call is
//! gated on the stored session, carries the bearer credential, and applies
//! the session policy's reaction to the response: a 401 (or a 404 on a
//! user-scoped path) clears both storage channels and sends the user to the
//! login screen before the error reaches the calling page.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use taskdeck_client::auth::LoginRequest;
//! use taskdeck_client::client::ApiClient;
//! use taskdeck_client::config::ClientConfig;
//! use taskdeck_client::mocks::RecordingNavigator;
//! use taskdeck_session::channel::MemoryChannel;
//! use taskdeck_session::clock::SystemClock;
//! use taskdeck_session::config::SessionConfig;
//! use taskdeck_session::policy::SessionPolicy;
//! use taskdeck_session::store::SessionStore;
//!
//! # async fn run() -> Result<(), taskdeck_client::error::ClientError> {
//! let session_config = SessionConfig::default();
//! let clock = Arc::new(SystemClock);
//! let policy = SessionPolicy::new(&session_config, clock.clone());
//! let store = SessionStore::new(
//!     MemoryChannel::new("cookie"),
//!     MemoryChannel::new("local"),
//!     session_config,
//!     clock,
//! );
//! let client = ApiClient::new(
//!     ClientConfig::new("https://api.example.com/api".to_string()),
//!     store,
//!     policy,
//!     RecordingNavigator::new(),
//! );
//!
//! client
//!     .login(&LoginRequest {
//!         email: "user@example.com".to_string(),
//!         password: "hunter2-but-better".to_string(),
//!     })
//!     .await?;
//!
//! let tasks = client.list_tasks().await?;
//! println!("{} open tasks", tasks.iter().filter(|t| !t.completed).count());
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod navigator;
pub mod tasks;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use auth::{AuthResponse, CurrentUser, LoginRequest, RegisterRequest, UserPublic};
pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use navigator::Navigator;
pub use tasks::{Task, TaskCreate, TaskUpdate, ToggleResponse};
