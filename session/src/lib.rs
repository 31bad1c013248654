//! # Taskdeck Session
//!
//! Client-side session and token lifecycle for the Taskdeck todo
//! application: advisory token-claims decoding, a dual-channel persistent
//! session store, and the policy that turns stored state and response
//! statuses into go/no-go decisions.
//!
//! ## Architecture
//!
//! ```text
//! page / request client
//!        │ read / write / clear
//!        ▼
//! SessionStore ──► cookie channel (preferred)
//!        │    └──► local channel  (fallback)
//!        │ decode
//!        ▼
//! TokenClaims ──► SessionPolicy ──► Proceed / ForceLogout / Surface
//! ```
//!
//! The store owns both persistence channels and writes through both on
//! every mutation, so clearing either channel independently never loses the
//! session. Claims decoding is advisory: no signature is verified; the
//! server stays the authority and a 401 always wins over the local expiry
//! claim.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use taskdeck_session::channel::MemoryChannel;
//! use taskdeck_session::clock::SystemClock;
//! use taskdeck_session::config::SessionConfig;
//! use taskdeck_session::policy::SessionPolicy;
//! use taskdeck_session::store::SessionStore;
//!
//! let config = SessionConfig::default();
//! let clock = Arc::new(SystemClock);
//! let policy = SessionPolicy::new(&config, clock.clone());
//! let store = SessionStore::new(
//!     MemoryChannel::new("cookie"),
//!     MemoryChannel::new("local"),
//!     config,
//!     clock,
//! );
//!
//! assert!(store.read().is_none());
//! assert!(!policy.is_authenticated(store.read().as_ref()));
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

// Public modules
pub mod channel;
pub mod claims;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod policy;
pub mod state;
pub mod store;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use channel::{FileChannel, MemoryChannel, StorageChannel};
pub use claims::{TokenClaims, TokenInfo, TokenValidation, decode_claims, token_info, validate_token};
pub use clock::{Clock, SystemClock};
pub use config::SessionConfig;
pub use error::{Result, SessionError};
pub use policy::{ResponseDirective, SessionPolicy};
pub use state::{Session, StoredIdentity};
pub use store::SessionStore;
