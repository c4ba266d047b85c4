//! Frame scheduling on top of `requestAnimationFrame`.
//!
//! Both loop flavours hand out a cancellable task object instead of a bare
//! frame handle: `cancel()` flips an active flag, cancels the pending frame
//! and drops the closure, so a torn-down loop can never fire again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};

use crate::wasm::dom;

type FrameClosure = Closure<dyn FnMut(f64)>;
type ClosureSlot = Rc<RefCell<Option<FrameClosure>>>;

fn schedule(slot: &ClosureSlot) -> Option<i32> {
    let slot = slot.borrow();
    let cb = slot.as_ref()?;
    dom::window()
        .ok()?
        .request_animation_frame(cb.as_ref().unchecked_ref())
        .ok()
}

/// Repeating per-frame callback for the continuously-animating effects.
///
/// `step` receives the rAF timestamp and runs once per frame; frame N is
/// fully applied before frame N+1 is scheduled. A step returning an error
/// terminates the loop (logged, never propagated) — a broken cosmetic effect
/// must not take the page down with it.
pub struct FrameLoop {
    active: Rc<Cell<bool>>,
    handle: Rc<Cell<i32>>,
    slot: ClosureSlot,
}

impl FrameLoop {
    pub fn start(
        mut step: impl FnMut(f64) -> Result<(), JsValue> + 'static,
    ) -> Result<FrameLoop, JsValue> {
        let active = Rc::new(Cell::new(true));
        let handle = Rc::new(Cell::new(0));
        let slot: ClosureSlot = Rc::new(RefCell::new(None));

        let f = slot.clone();
        let loop_active = active.clone();
        let loop_handle = handle.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            if !loop_active.get() {
                return;
            }
            if let Err(err) = step(timestamp) {
                log::warn!("frame step failed, stopping loop: {err:?}");
                loop_active.set(false);
                return;
            }
            match schedule(&f) {
                Some(id) => loop_handle.set(id),
                None => loop_active.set(false),
            }
        }) as Box<dyn FnMut(f64)>));

        let first = schedule(&slot).ok_or("requestAnimationFrame unavailable")?;
        handle.set(first);

        Ok(FrameLoop {
            active,
            handle,
            slot,
        })
    }

    /// Stops the loop synchronously; no frame fires after this returns.
    pub fn cancel(&self) {
        if self.active.replace(false) {
            if let Ok(win) = dom::window() {
                let _ = win.cancel_animation_frame(self.handle.get());
            }
        }
        self.slot.borrow_mut().take();
    }
}

/// Event-driven recomputation coalesced to at most one pending frame.
///
/// `request()` may be called at any burst rate; the wrapped callback runs at
/// most once per animation frame.
#[derive(Clone)]
pub struct CoalescedFrame {
    active: Rc<Cell<bool>>,
    pending: Rc<Cell<bool>>,
    handle: Rc<Cell<i32>>,
    slot: ClosureSlot,
}

impl CoalescedFrame {
    pub fn new(mut run: impl FnMut() -> Result<(), JsValue> + 'static) -> CoalescedFrame {
        let active = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(false));
        let handle = Rc::new(Cell::new(0));
        let slot: ClosureSlot = Rc::new(RefCell::new(None));

        let cb_active = active.clone();
        let cb_pending = pending.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            cb_pending.set(false);
            if !cb_active.get() {
                return;
            }
            if let Err(err) = run() {
                log::warn!("coalesced frame failed: {err:?}");
                cb_active.set(false);
            }
        }) as Box<dyn FnMut(f64)>));

        CoalescedFrame {
            active,
            pending,
            handle,
            slot,
        }
    }

    /// Schedules one frame unless one is already pending.
    pub fn request(&self) {
        if !self.active.get() || self.pending.replace(true) {
            return;
        }
        match schedule(&self.slot) {
            Some(id) => self.handle.set(id),
            None => {
                self.pending.set(false);
            }
        }
    }

    /// Cancels any pending frame and deactivates the task.
    pub fn cancel(&self) {
        self.active.set(false);
        if self.pending.replace(false) {
            if let Ok(win) = dom::window() {
                let _ = win.cancel_animation_frame(self.handle.get());
            }
        }
        self.slot.borrow_mut().take();
    }
}
