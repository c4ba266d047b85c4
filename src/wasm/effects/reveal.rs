//! Scroll-triggered reveal of page content.
//!
//! Content elements are tagged and observed; the first time one crosses the
//! visibility threshold it is marked revealed and dropped from the observer.
//! A revealed element is never hidden again, so scrolling back and forth
//! cannot replay the animation.

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::registry::Registry;
use crate::wasm::dom;

pub const KEY: &str = "reveal";

const SELECTORS: [&str; 10] = [
    ".fx-reveal",
    "main h1",
    "main h2",
    "main h3",
    "main p",
    "main ul",
    "main ol",
    "main pre",
    "main blockquote",
    "main table",
];

/// Marks an element revealed. Returns false if it already was, so a second
/// intersection callback for the same element is a no-op.
pub fn mark_revealed(element: &HtmlElement) -> bool {
    let data = element.dataset();
    if data.get("fxRevealed").is_some() {
        return false;
    }
    let _ = data.set("fxRevealed", "true");
    true
}

pub fn mount(registry: &Registry) -> Result<(), JsValue> {
    if !registry.try_claim(KEY) {
        return Ok(());
    }

    let document = dom::document()?;
    let nodes = document.query_selector_all(&SELECTORS.join(","))?;
    if nodes.length() == 0 {
        registry.release(KEY);
        return Ok(());
    }

    let elements: Vec<HtmlElement> = (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect();

    for (i, element) in elements.iter().enumerate() {
        element.dataset().set("fxReveal", "")?;
        // Stagger early elements, then cap the delay so long pages don't lag.
        element.style().set_property(
            "--fx-delay",
            &format!("{:.3}s", (i as f64 * 0.045).min(0.6)),
        )?;
    }

    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                if let Some(element) = target.dyn_ref::<HtmlElement>() {
                    mark_revealed(element);
                }
                // One-shot per element.
                observer.unobserve(&target);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from(0.18));
    options.set_root_margin("0px 0px -60px 0px");
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for element in &elements {
        observer.observe(element);
    }

    registry.register(KEY, move || {
        observer.disconnect();
        drop(callback);
        Ok(())
    });
    Ok(())
}
