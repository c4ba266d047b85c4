#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use fx_wasm::wasm::effects::reveal::mark_revealed;
use fx_wasm::wasm::events::Listener;
use fx_wasm::wasm::EffectRuntime;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn count(selector: &str) -> u32 {
    document().query_selector_all(selector).unwrap().length()
}

fn subsystem_nodes() -> u32 {
    count("#fx-rain") + count("#fx-trail") + count("#fx-aurora") + count("#fx-progress")
}

#[wasm_bindgen_test]
fn mount_unmount_cycles_leave_no_nodes() {
    let runtime = EffectRuntime::new();
    for _ in 0..2 {
        runtime.mount();
        assert_eq!(count("#fx-rain"), 1);
        assert_eq!(count("#fx-aurora"), 1);
        assert_eq!(count("#fx-progress"), 1);
        assert!(runtime.pending_teardowns() > 0);

        runtime.unmount();
        assert_eq!(subsystem_nodes(), 0);
        assert_eq!(runtime.pending_teardowns(), 0);
    }
}

#[wasm_bindgen_test]
fn double_mount_creates_no_second_instance() {
    let runtime = EffectRuntime::new();
    runtime.mount();
    let after_first = subsystem_nodes();
    let canvases = count("canvas");

    runtime.mount();
    assert_eq!(subsystem_nodes(), after_first);
    assert_eq!(count("canvas"), canvases);
    assert!(runtime.is_running("rain"));

    runtime.unmount();
    assert_eq!(subsystem_nodes(), 0);
    assert!(!runtime.is_running("rain"));
}

#[wasm_bindgen_test]
fn single_effect_mounts_as_widget() {
    let runtime = EffectRuntime::new();
    runtime.mount_effect("rain").unwrap();
    assert_eq!(count("#fx-rain"), 1);
    assert_eq!(count("#fx-progress"), 0);
    assert!(runtime.is_running("rain"));
    assert!(!runtime.is_running("progress"));

    assert!(runtime.mount_effect("sparkles").is_err());

    runtime.unmount();
    assert_eq!(count("#fx-rain"), 0);
}

#[wasm_bindgen_test]
fn dropped_listener_stops_firing() {
    let window = web_sys::window().unwrap();
    let fired = Rc::new(Cell::new(0));

    let listener = {
        let fired = fired.clone();
        Listener::add(&window, "fx-test-event", move |_| {
            fired.set(fired.get() + 1);
        })
        .unwrap()
    };

    let dispatch = || {
        let event = web_sys::Event::new("fx-test-event").unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
    };

    dispatch();
    assert_eq!(fired.get(), 1);

    drop(listener);
    dispatch();
    assert_eq!(fired.get(), 1);
}

#[wasm_bindgen_test]
fn reveal_marks_an_element_at_most_once() {
    let element: web_sys::HtmlElement = document()
        .create_element("div")
        .unwrap()
        .dyn_into()
        .unwrap();

    assert!(mark_revealed(&element));
    assert!(!mark_revealed(&element));
    assert_eq!(element.dataset().get("fxRevealed").as_deref(), Some("true"));
}
