//! Full-viewport canvas surfaces the painting effects draw on.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::wasm::dom;

/// A fixed-position canvas covering the viewport, sized to the device pixel
/// ratio so logical drawing coordinates stay in CSS pixels.
pub struct Surface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl Surface {
    /// Creates the canvas, styles it, appends it to `<body>` and sizes it.
    ///
    /// Returns `Ok(None)` when an element with `id` already exists (the
    /// effect is already running) or when no 2d context is available; both
    /// mean the caller must skip the rest of its setup.
    pub fn create(
        id: &str,
        z_index: i32,
        blend_mode: &str,
        opacity: f64,
    ) -> Result<Option<Surface>, JsValue> {
        let document = dom::document()?;
        if document.get_element_by_id(id).is_some() {
            log::warn!("surface #{id} already present, skipping");
            return Ok(None);
        }

        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id(id);

        let ctx = match canvas.get_context("2d") {
            Ok(Some(obj)) => match obj.dyn_into::<CanvasRenderingContext2d>() {
                Ok(ctx) => ctx,
                Err(_) => {
                    log::warn!("surface #{id}: unexpected 2d context type");
                    return Ok(None);
                }
            },
            _ => {
                log::warn!("surface #{id}: 2d context unavailable");
                return Ok(None);
            }
        };

        let style = canvas.style();
        style.set_property("position", "fixed")?;
        style.set_property("top", "0")?;
        style.set_property("left", "0")?;
        style.set_property("width", "100%")?;
        style.set_property("height", "100%")?;
        style.set_property("pointer-events", "none")?;
        style.set_property("z-index", &z_index.to_string())?;
        style.set_property("mix-blend-mode", blend_mode)?;
        style.set_property("opacity", &opacity.to_string())?;

        document
            .body()
            .ok_or("no body")?
            .append_child(&canvas)?;

        let surface = Surface { canvas, ctx };
        surface.resize()?;
        Ok(Some(surface))
    }

    /// Recomputes the backing store from the viewport size and device pixel
    /// ratio, then rescales the context so drawing stays viewport-relative.
    pub fn resize(&self) -> Result<(), JsValue> {
        let win = dom::window()?;
        let (w, h) = dom::viewport()?;
        let dpr = match win.device_pixel_ratio() {
            r if r > 0.0 => r,
            _ => 1.0,
        };

        self.canvas.set_width((w * dpr) as u32);
        self.canvas.set_height((h * dpr) as u32);

        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.scale(dpr, dpr)?;
        Ok(())
    }

    pub fn ctx(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Removes the canvas from the document.
    pub fn dispose(&self) {
        self.canvas.remove();
    }
}
