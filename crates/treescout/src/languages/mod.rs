//! Bundled language profiles.
//!
//! Profiles are pure data: pattern text plus metadata. The extraction
//! engine never branches on a language, so adding one here (or registering
//! an external profile) requires no engine changes.

pub mod go;
pub mod python;
pub mod rust;
pub mod typescript;
