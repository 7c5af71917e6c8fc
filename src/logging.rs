use wasm_bindgen::prelude::*;
use web_sys::console;

static LOGGER: WasmLog = WasmLog;

/// Forwards `log` records to the browser console, coloured by level.
#[derive(Default)]
pub struct WasmLog;

impl log::Log for WasmLog {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let (write, name, color): (fn(&JsValue, &JsValue), &str, &str) = match record.level() {
            log::Level::Trace => (console::log_2, "trace", "color:plum"),
            log::Level::Debug => (console::log_2, "debug", "color:cyan"),
            log::Level::Info => (console::info_2, "info", "color:mediumseagreen"),
            log::Level::Warn => (console::warn_2, "warn", "color:goldenrod"),
            log::Level::Error => (console::error_2, "error", "color:red"),
        };
        let msg = format!("%c{}\t{}", name, record.args());
        write(&JsValue::from_str(&msg), &JsValue::from_str(color));
    }

    fn flush(&self) {}
}

/// Runs once when the wasm module is instantiated.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // a second instantiation keeps the logger it already has
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
