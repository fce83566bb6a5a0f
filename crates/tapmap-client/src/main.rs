//! Tapmap Client
//!
//! Yew WASM frontend for the hotspot editor. Runs in the browser only;
//! build with `trunk serve` or `cargo check --target wasm32-unknown-unknown`.

mod app;
mod components;
mod hooks;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_web::MakeWebConsoleWriter;

fn main() {
    console_error_panic_hook::set_once();

    // Initialize tracing for wasm with tracing-web
    let filter = EnvFilter::new("info");

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new())
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();

    yew::Renderer::<App>::new().render();
}
