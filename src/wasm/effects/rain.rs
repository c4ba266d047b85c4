//! Falling-glyph rain painted behind the page content.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::registry::Registry;
use crate::state::{RainField, RAIN_GLYPHS, RAIN_GLYPH_SIZE};
use crate::wasm::dom;
use crate::wasm::events::Listener;
use crate::wasm::sched::FrameLoop;
use crate::wasm::surface::Surface;

pub const KEY: &str = "rain";
const SURFACE_ID: &str = "fx-rain";

pub fn mount(registry: &Registry) -> Result<(), JsValue> {
    if !registry.try_claim(KEY) {
        return Ok(());
    }

    let Some(surface) = Surface::create(SURFACE_ID, -1, "normal", 0.16)? else {
        registry.release(KEY);
        return Ok(());
    };
    let surface = Rc::new(surface);

    let (width, _) = dom::viewport()?;
    let field = Rc::new(RefCell::new(RainField::new(width, RAIN_GLYPH_SIZE)));

    let resize = {
        let surface = surface.clone();
        let field = field.clone();
        Listener::add(&dom::window()?, "resize", move |_| {
            let _ = surface.resize();
            if let Ok((width, _)) = dom::viewport() {
                field.borrow_mut().resize(width);
            }
        })?
    };

    let glyphs: Vec<char> = RAIN_GLYPHS.chars().collect();
    let frame_loop = {
        let surface = surface.clone();
        FrameLoop::start(move |_| {
            let ctx = surface.ctx();
            let (width, height) = dom::viewport()?;

            // Translucent overlay leaves a fading trail behind each glyph.
            ctx.set_fill_style_str("rgba(4, 8, 18, 0.18)");
            ctx.fill_rect(0.0, 0.0, width, height);

            ctx.set_fill_style_str("rgba(0, 255, 163, 0.85)");
            ctx.set_font(&format!(
                "600 {RAIN_GLYPH_SIZE}px \"JetBrains Mono\", monospace"
            ));

            let mut rand = || js_sys::Math::random();
            let mut failed = None;
            field.borrow_mut().step(height, &mut rand, &mut |x, y| {
                let pick = (js_sys::Math::random() * glyphs.len() as f64) as usize;
                let glyph = glyphs[pick.min(glyphs.len() - 1)];
                if let Err(err) = ctx.fill_text(&glyph.to_string(), x, y) {
                    failed = Some(err);
                }
            });
            match failed {
                Some(err) => Err(err),
                None => Ok(()),
            }
        })?
    };

    registry.register(KEY, move || {
        frame_loop.cancel();
        drop(resize);
        surface.dispose();
        Ok(())
    });
    Ok(())
}
