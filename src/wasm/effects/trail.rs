//! Particle trail following the pointer.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::MouseEvent;

use crate::registry::Registry;
use crate::state::TrailField;
use crate::wasm::dom;
use crate::wasm::events::Listener;
use crate::wasm::sched::FrameLoop;
use crate::wasm::surface::Surface;

pub const KEY: &str = "trail";
const SURFACE_ID: &str = "fx-trail";

pub fn mount(registry: &Registry) -> Result<(), JsValue> {
    if !registry.try_claim(KEY) {
        return Ok(());
    }

    let win = dom::window()?;
    // Touch devices have no hover pointer to trail behind.
    if let Ok(Some(query)) = win.match_media("(pointer: coarse)") {
        if query.matches() {
            log::debug!("coarse pointer, skipping trail effect");
            registry.release(KEY);
            return Ok(());
        }
    }

    let Some(surface) = Surface::create(SURFACE_ID, 60, "screen", 0.85)? else {
        registry.release(KEY);
        return Ok(());
    };
    let surface = Rc::new(surface);

    let field = Rc::new(RefCell::new(TrailField::new(TrailField::CAP)));
    let pointer = Rc::new(Cell::new((0.0_f64, 0.0_f64)));
    let pointer_active = Rc::new(Cell::new(false));

    let spawn_at = {
        let field = field.clone();
        let pointer = pointer.clone();
        let pointer_active = pointer_active.clone();
        move |event: &web_sys::Event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let x = mouse.client_x() as f64;
                let y = mouse.client_y() as f64;
                pointer.set((x, y));
                pointer_active.set(true);
                let mut rand = || js_sys::Math::random();
                field.borrow_mut().spawn(x, y, &mut rand);
            }
        }
    };

    let on_move = {
        let spawn_at = spawn_at.clone();
        Listener::add(&win, "pointermove", move |event| spawn_at(&event))?
    };
    let on_down = Listener::add(&win, "pointerdown", move |event| spawn_at(&event))?;
    let on_up = {
        let pointer_active = pointer_active.clone();
        Listener::add(&win, "pointerup", move |_| pointer_active.set(false))?
    };
    let on_leave = {
        let pointer_active = pointer_active.clone();
        Listener::add(&win, "pointerleave", move |_| pointer_active.set(false))?
    };

    let frame_loop = {
        let surface = surface.clone();
        let field = field.clone();
        FrameLoop::start(move |_| {
            let ctx = surface.ctx();
            let (width, height) = dom::viewport()?;

            ctx.set_fill_style_str("rgba(5, 10, 18, 0.18)");
            ctx.fill_rect(0.0, 0.0, width, height);

            let mut field = field.borrow_mut();
            if pointer_active.get() {
                let (x, y) = pointer.get();
                let mut rand = || js_sys::Math::random();
                field.spawn(x, y, &mut rand);
            }
            field.step();

            for p in field.iter() {
                let alpha = p.alpha();
                ctx.begin_path();
                ctx.set_fill_style_str(&format!("hsla({:.0}, 100%, 65%, {alpha:.3})", p.hue));
                ctx.set_shadow_blur(14.0);
                ctx.set_shadow_color(&format!("hsla({:.0}, 100%, 65%, 0.8)", p.hue));
                ctx.arc(p.x, p.y, p.size * (1.0 + alpha * 2.0), 0.0, TAU)?;
                ctx.fill();
                ctx.close_path();
            }
            ctx.set_shadow_blur(0.0);
            Ok(())
        })?
    };

    registry.register(KEY, move || {
        frame_loop.cancel();
        drop(on_move);
        drop(on_down);
        drop(on_up);
        drop(on_leave);
        field.borrow_mut().clear();
        surface.dispose();
        Ok(())
    });
    Ok(())
}
