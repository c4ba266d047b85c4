//! Reading-progress bar pinned to the top of the viewport.
//!
//! The ratio is recomputed only when scroll or resize events arrive, and
//! bursts coalesce into a single pending animation frame.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::registry::Registry;
use crate::state::scroll_progress;
use crate::wasm::dom;
use crate::wasm::events::Listener;
use crate::wasm::sched::CoalescedFrame;

pub const KEY: &str = "progress";
const BAR_ID: &str = "fx-progress";

pub fn mount(registry: &Registry) -> Result<(), JsValue> {
    if !registry.try_claim(KEY) {
        return Ok(());
    }

    let document = dom::document()?;
    if document.get_element_by_id(BAR_ID).is_some() {
        log::warn!("progress bar already present, skipping");
        registry.release(KEY);
        return Ok(());
    }

    let bar: HtmlElement = document.create_element("div")?.dyn_into()?;
    bar.set_id(BAR_ID);
    let style = bar.style();
    style.set_property("position", "fixed")?;
    style.set_property("top", "0")?;
    style.set_property("left", "0")?;
    style.set_property("width", "100%")?;
    style.set_property("height", "3px")?;
    style.set_property("transform-origin", "0 0")?;
    style.set_property("transform", "scaleX(var(--fx-progress, 0))")?;
    style.set_property("background", "linear-gradient(90deg, #00ffa3, #00c8ff)")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("z-index", "50")?;
    document.body().ok_or("no body")?.append_child(&bar)?;

    let recompute = {
        let bar = bar.clone();
        CoalescedFrame::new(move || {
            let win = dom::window()?;
            let root = dom::document()?
                .document_element()
                .ok_or("no document element")?;
            let progress = scroll_progress(
                win.scroll_y()?,
                root.scroll_height() as f64,
                root.client_height() as f64,
            );
            bar.style()
                .set_property("--fx-progress", &format!("{progress:.4}"))?;
            Ok(())
        })
    };
    // Paint the initial position without waiting for a scroll.
    recompute.request();

    let win = dom::window()?;
    let on_scroll = {
        let recompute = recompute.clone();
        Listener::add(&win, "scroll", move |_| recompute.request())?
    };
    let on_resize = {
        let recompute = recompute.clone();
        Listener::add(&win, "resize", move |_| recompute.request())?
    };

    registry.register(KEY, move || {
        recompute.cancel();
        drop(on_scroll);
        drop(on_resize);
        bar.remove();
        Ok(())
    });
    Ok(())
}
