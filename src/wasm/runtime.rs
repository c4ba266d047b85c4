//! Entry points the host site framework calls across the wasm boundary.

use wasm_bindgen::prelude::*;

use crate::registry::Registry;
use crate::wasm::effects::{aurora, progress, rain, reveal, trail};

#[wasm_bindgen(start)]
pub fn boot() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One runtime per page/application root. The host calls `mount` after the
/// page DOM attaches and `unmount` before replacing it; both are safe to
/// call repeatedly.
#[wasm_bindgen]
pub struct EffectRuntime {
    registry: Registry,
}

#[wasm_bindgen]
impl EffectRuntime {
    #[wasm_bindgen(constructor)]
    pub fn new() -> EffectRuntime {
        EffectRuntime {
            registry: Registry::new(),
        }
    }

    /// Mounts every effect. An effect that fails to set up is logged and
    /// skipped; the rest still mount.
    pub fn mount(&self) {
        for name in [rain::KEY, trail::KEY, aurora::KEY, progress::KEY, reveal::KEY] {
            if let Err(err) = self.mount_by_key(name) {
                log::warn!("effect '{name}' failed to mount: {err:?}");
            }
        }
        log::debug!("mounted, {} teardowns pending", self.registry.len());
    }

    /// Mounts a single effect by name, for embedding one effect as a
    /// standalone widget. Errors on unknown names.
    pub fn mount_effect(&self, name: &str) -> Result<(), JsValue> {
        self.mount_by_key(name)
    }

    /// Drains the registry: every teardown runs once, newest first, and a
    /// failing teardown never blocks the others.
    pub fn unmount(&self) {
        self.registry.drain();
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.registry.is_live(match name {
            "rain" => rain::KEY,
            "trail" => trail::KEY,
            "aurora" => aurora::KEY,
            "progress" => progress::KEY,
            "reveal" => reveal::KEY,
            _ => return false,
        })
    }

    #[wasm_bindgen(getter)]
    pub fn pending_teardowns(&self) -> usize {
        self.registry.len()
    }
}

impl EffectRuntime {
    fn mount_by_key(&self, name: &str) -> Result<(), JsValue> {
        match name {
            "rain" => rain::mount(&self.registry),
            "trail" => trail::mount(&self.registry),
            "aurora" => aurora::mount(&self.registry),
            "progress" => progress::mount(&self.registry),
            "reveal" => reveal::mount(&self.registry),
            other => Err(JsValue::from_str(&format!("unknown effect: {other}"))),
        }
    }
}

impl Default for EffectRuntime {
    fn default() -> Self {
        EffectRuntime::new()
    }
}
