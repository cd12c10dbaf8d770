//! Console logging. Writes through `console.log` in the browser and compiles to
//! nothing on native targets, where the wasm-bindgen imports are unavailable.

#[cfg(target_arch = "wasm32")]
pub(crate) fn write(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn write(_msg: &str) {}

macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::log::write(&format!($($t)*))
    };
}

pub(crate) use console_log;
