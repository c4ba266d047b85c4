//! Lifecycle registry shared by every effect on a page.
//!
//! The registry is a clonable handle owned by the application root. Effects
//! claim a guard key before doing any setup and register exactly one teardown
//! closure; `drain` runs the teardowns in reverse registration order when the
//! host replaces the page content.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use thiserror::Error;

/// Error reported by a teardown closure. Drain logs these and keeps going.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TeardownError(String);

impl TeardownError {
    pub fn new(msg: impl Into<String>) -> Self {
        TeardownError(msg.into())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for TeardownError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        TeardownError(format!("{value:?}"))
    }
}

type Teardown = Box<dyn FnOnce() -> Result<(), TeardownError>>;

struct Entry {
    key: &'static str,
    run: Teardown,
}

#[derive(Default)]
struct Inner {
    teardowns: Vec<Entry>,
    live: HashSet<&'static str>,
}

/// Ordered collection of teardown callbacks plus the live-effect guard set.
///
/// Cloning yields another handle to the same registry; all state is
/// single-threaded (`Rc`), matching the browser main-thread model.
#[derive(Clone)]
pub struct Registry {
    inner: Rc<RefCell<Inner>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Marks `key` live. Returns false (and changes nothing) if an instance
    /// already holds the key, in which case the caller must skip its setup.
    pub fn try_claim(&self, key: &'static str) -> bool {
        self.inner.borrow_mut().live.insert(key)
    }

    /// Clears a guard key so the effect can be mounted again. Used by effects
    /// that abort setup after claiming; `drain` releases keys itself.
    pub fn release(&self, key: &'static str) {
        self.inner.borrow_mut().live.remove(key);
    }

    pub fn is_live(&self, key: &'static str) -> bool {
        self.inner.borrow().live.contains(key)
    }

    /// Appends a teardown. Runs during `drain`, after every teardown
    /// registered later.
    pub fn register<F>(&self, key: &'static str, teardown: F)
    where
        F: FnOnce() -> Result<(), TeardownError> + 'static,
    {
        self.inner.borrow_mut().teardowns.push(Entry {
            key,
            run: Box::new(teardown),
        });
    }

    /// Number of registered teardowns still pending.
    pub fn len(&self) -> usize {
        self.inner.borrow().teardowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().teardowns.is_empty()
    }

    /// Invokes every teardown in reverse registration order.
    ///
    /// Each entry is removed and its key released before its closure runs, so
    /// a teardown may register new work (drained in the same pass) or remount
    /// its effect without tripping the guard. A failing teardown is logged
    /// and skipped; the rest still run. Leaves the registry empty.
    pub fn drain(&self) {
        loop {
            let entry = self.inner.borrow_mut().teardowns.pop();
            let Some(entry) = entry else { break };
            self.release(entry.key);
            if let Err(err) = (entry.run)() {
                log::warn!("teardown for effect '{}' failed: {err}", entry.key);
            } else {
                log::debug!("effect '{}' torn down", entry.key);
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn claim_is_exclusive_until_released() {
        let registry = Registry::new();
        assert!(registry.try_claim("rain"));
        assert!(!registry.try_claim("rain"));
        assert!(registry.is_live("rain"));
        registry.release("rain");
        assert!(registry.try_claim("rain"));
    }

    #[test]
    fn drain_runs_in_reverse_registration_order() {
        let registry = Registry::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for key in ["a", "b", "c"] {
            let order = order.clone();
            registry.register(key, move || {
                order.borrow_mut().push(key);
                Ok(())
            });
        }
        registry.drain();
        assert_eq!(*order.borrow(), vec!["c", "b", "a"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn failing_teardown_does_not_block_the_rest() {
        let registry = Registry::new();
        let ran = Rc::new(RefCell::new(Vec::new()));

        let r = ran.clone();
        registry.register("first", move || {
            r.borrow_mut().push("first");
            Ok(())
        });
        registry.register("middle", || Err(TeardownError::new("boom")));
        let r = ran.clone();
        registry.register("last", move || {
            r.borrow_mut().push("last");
            Ok(())
        });

        registry.drain();
        assert_eq!(*ran.borrow(), vec!["last", "first"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn drain_releases_guard_keys() {
        let registry = Registry::new();
        assert!(registry.try_claim("trail"));
        registry.register("trail", || Ok(()));
        registry.drain();
        assert!(!registry.is_live("trail"));
        assert!(registry.try_claim("trail"));
    }

    #[test]
    fn reentrant_registration_during_drain_is_drained() {
        let registry = Registry::new();
        let ran = Rc::new(RefCell::new(Vec::new()));

        let inner_ran = ran.clone();
        let handle = registry.clone();
        registry.register("outer", move || {
            let inner_ran = inner_ran.clone();
            handle.register("inner", move || {
                inner_ran.borrow_mut().push("inner");
                Ok(())
            });
            Ok(())
        });

        registry.drain();
        assert_eq!(*ran.borrow(), vec!["inner"]);
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_is_remountable_after_drain() {
        let registry = Registry::new();
        let count = Rc::new(RefCell::new(0));
        for _ in 0..2 {
            assert!(registry.try_claim("aurora"));
            let count = count.clone();
            registry.register("aurora", move || {
                *count.borrow_mut() += 1;
                Ok(())
            });
            registry.drain();
        }
        assert_eq!(*count.borrow(), 2);
    }
}
