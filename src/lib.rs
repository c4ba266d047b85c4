//! Visual effects runtime for the documentation theme.
//!
//! The host site framework constructs a [`wasm::EffectRuntime`] once, calls
//! `mount()` after the page DOM is attached and `unmount()` before replacing
//! it on client-side navigation. Frame-state math and the lifecycle registry
//! are target-neutral so they build and test on the host; everything touching
//! the DOM is compiled for wasm32 only.

pub mod registry;
pub mod state;

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    pub mod dom;
    pub mod effects;
    pub mod events;
    pub mod runtime;
    pub mod sched;
    pub mod surface;

    pub use runtime::EffectRuntime;
}
