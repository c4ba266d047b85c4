//! Aurora gradient bands driven by CSS custom properties.
//!
//! No canvas here: three fixed bands each get `--fx-offset` and `--fx-glow`
//! recomputed every frame from phase-shifted sines of the frame timestamp.
//! Nothing accumulates between frames, so the animation cannot drift.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use crate::registry::Registry;
use crate::wasm::dom;
use crate::wasm::sched::FrameLoop;

pub const KEY: &str = "aurora";
const CONTAINER_ID: &str = "fx-aurora";

const BAND_SPEEDS: [f64; 3] = [0.6, 0.9, 1.3];
const BAND_PHASES: [f64; 3] = [0.0, 2.1, 4.2];
const BAND_TINTS: [&str; 3] = [
    "rgba(0, 255, 163, 0.25)",
    "rgba(0, 200, 255, 0.22)",
    "rgba(120, 80, 255, 0.18)",
];

pub fn mount(registry: &Registry) -> Result<(), JsValue> {
    if !registry.try_claim(KEY) {
        return Ok(());
    }

    let document = dom::document()?;
    if document.get_element_by_id(CONTAINER_ID).is_some() {
        log::warn!("aurora container already present, skipping");
        registry.release(KEY);
        return Ok(());
    }

    let container: HtmlElement = document.create_element("div")?.dyn_into()?;
    container.set_id(CONTAINER_ID);
    let style = container.style();
    style.set_property("position", "fixed")?;
    style.set_property("inset", "0")?;
    style.set_property("overflow", "hidden")?;
    style.set_property("pointer-events", "none")?;
    style.set_property("z-index", "-1")?;

    let mut bands = Vec::with_capacity(BAND_TINTS.len());
    for tint in BAND_TINTS {
        let band: HtmlElement = document.create_element("div")?.dyn_into()?;
        band.set_class_name("fx-aurora-band");
        let style = band.style();
        style.set_property("position", "absolute")?;
        style.set_property("inset", "-20% 0")?;
        style.set_property(
            "background",
            &format!("linear-gradient(120deg, transparent, {tint}, transparent)"),
        )?;
        style.set_property("filter", "blur(60px)")?;
        style.set_property("opacity", "var(--fx-glow, 0.3)")?;
        style.set_property("transform", "translateY(var(--fx-offset, 0px))")?;
        container.append_child(&band)?;
        bands.push(band);
    }
    document.body().ok_or("no body")?.append_child(&container)?;

    let frame_loop = FrameLoop::start(move |timestamp| {
        let t = timestamp / 1000.0;
        for (i, band) in bands.iter().enumerate() {
            let speed = BAND_SPEEDS[i % BAND_SPEEDS.len()];
            let phase = BAND_PHASES[i % BAND_PHASES.len()];
            let offset = (t * speed + phase).sin() * 40.0;
            let glow = 0.35 + 0.25 * (t * speed * 0.7 + phase).sin();
            let style = band.style();
            style.set_property("--fx-offset", &format!("{offset:.2}px"))?;
            style.set_property("--fx-glow", &format!("{glow:.3}"))?;
        }
        Ok(())
    })?;

    registry.register(KEY, move || {
        frame_loop.cancel();
        container.remove();
        Ok(())
    });
    Ok(())
}
