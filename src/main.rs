//! Host-side helper: `cargo run` compiles the WASM bundle and serves the
//! demo page so the effects can be eyeballed outside the docs site.

use std::process::{Command, Stdio};
use std::{env, thread, time::Duration};

fn main() {
    // Only meaningful on non-wasm targets.
    if env::var("TARGET").unwrap_or_default() == "wasm32-unknown-unknown" {
        return;
    }

    println!("Building WASM pkg …");
    match Command::new("wasm-pack")
        .args([
            "build",
            "--release",
            "--target",
            "web",
            "--out-dir",
            "static/pkg",
        ])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(_) => {
            eprintln!("wasm-pack finished with errors.");
            std::process::exit(1);
        }
        Err(_) => {
            eprintln!(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/). \
                 Serving whatever is already in static/."
            );
        }
    }

    println!("Demo page at http://127.0.0.1:8000 …");
    let mut server = Command::new("python3")
        .args(["-m", "http.server", "8000", "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start http server");

    // Keep serving until interrupted.
    loop {
        if let Ok(Some(status)) = server.try_wait() {
            eprintln!("http server exited: {status}");
            return;
        }
        thread::sleep(Duration::from_secs(1));
    }
}
