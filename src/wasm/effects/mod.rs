//! The effect modules.
//!
//! Each module exposes `mount(&Registry)`: it claims its guard key, builds
//! its surface/listeners/loop, and registers exactly one teardown. A mount
//! that finds its key already live, or cannot get what it needs from the
//! browser, returns without registering anything.

pub mod aurora;
pub mod progress;
pub mod rain;
pub mod reveal;
pub mod trail;
