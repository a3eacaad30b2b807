//! Lyra Core
//!
//! Platform-agnostic core types, traits, and error handling for Lyra.
//!
//! This crate provides the foundational building blocks shared by the
//! playback core and the platform bridges:
//! - **Domain Types**: `Track`, `TrackId`, `ListeningReport`
//! - **Collaborator Traits**: `TelemetrySink`
//! - **Error Handling**: Unified `CoreError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use lyra_core::types::{Track, TrackId};
//! use std::time::Duration;
//!
//! let track = Track::new(
//!     TrackId::new("t-1042"),
//!     "Night Drive",
//!     "Mira Vale",
//!     Duration::from_secs(214),
//!     "https://cdn.lyra.fm/audio/t-1042.m4a",
//! );
//! assert_eq!(track.id.as_str(), "t-1042");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use traits::TelemetrySink;
pub use types::{ListeningReport, Track, TrackId};
