use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use dashboard::{Dashboard, NavEvent};
use formats::bootstrap::{Assets, BootstrapError, assets_from_strings};
use formats::site::{FALLBACK_CONFIG, PRIMARY_CONFIG, resolve_site_config};
use foundation::time::Time;

const CONTENT_FILE: &str = "content.json";
const GEOGRAPHY_FILE: &str = "world.geojson";

/// Wheel delta to zoom factor.
const WHEEL_SENSITIVITY: f64 = 0.002;

thread_local! {
    static STATE: RefCell<Option<Dashboard>> = const { RefCell::new(None) };
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn with_dashboard<T>(f: impl FnOnce(&mut Dashboard) -> T) -> Result<T, JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let dash = s
            .as_mut()
            .ok_or_else(|| JsValue::from_str("dashboard not initialized"))?;
        Ok(f(dash))
    })
}

fn frame_json(dash: &Dashboard) -> Result<String, JsValue> {
    dash.render_json().map_err(js_err)
}

fn install(assets: Result<Assets, BootstrapError>, width: f64, height: f64) -> Result<String, JsValue> {
    // The map stays uninitialized on failure; the host shows the message
    // in place of the map.
    let assets = assets.map_err(|e| {
        log(&format!("bootstrap failed: {e}"));
        JsValue::from_str(&e.user_message())
    })?;
    let dash = Dashboard::new(assets, width, height).map_err(|e| {
        log(&format!("bootstrap failed: {e}"));
        JsValue::from_str("Die Inhaltsdaten der Karte sind fehlerhaft.")
    })?;
    let frame = frame_json(&dash)?;
    STATE.with(|state| *state.borrow_mut() = Some(dash));
    Ok(frame)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Initializes from already-fetched payloads. Returns the first frame as JSON.
#[wasm_bindgen]
pub fn init(content: &str, geography: &str, width: f64, height: f64) -> Result<String, JsValue> {
    install(assets_from_strings(content, geography), width, height)
}

/// Fetches `content.json` and `world.geojson` under `base_url`.
#[wasm_bindgen]
pub async fn load(base_url: String, width: f64, height: f64) -> Result<String, JsValue> {
    let base = base_url.trim_end_matches('/');
    let fetched = async {
        let content = fetch_text(&format!("{base}/{CONTENT_FILE}")).await?;
        let geography = fetch_text(&format!("{base}/{GEOGRAPHY_FILE}")).await?;
        Ok::<_, String>((content, geography))
    }
    .await;
    match fetched {
        Ok((content, geography)) => install(assets_from_strings(&content, &geography), width, height),
        Err(e) => {
            log(&format!("bootstrap failed: {e}"));
            Err(JsValue::from_str("Die Kartendaten konnten nicht geladen werden."))
        }
    }
}

/// Site branding: `config.json`, else `config.example.json`, else defaults.
#[wasm_bindgen]
pub async fn load_site(base_url: String) -> Result<String, JsValue> {
    let base = base_url.trim_end_matches('/');
    let primary = fetch_text(&format!("{base}/{PRIMARY_CONFIG}")).await.ok();
    let fallback = match primary {
        Some(_) => None,
        None => fetch_text(&format!("{base}/{FALLBACK_CONFIG}")).await.ok(),
    };
    let (config, source) = resolve_site_config(primary.as_deref(), fallback.as_deref());
    log(&format!("site config from {}", source.as_str()));
    let mut value = serde_json::to_value(&config).map_err(js_err)?;
    if let (Some(obj), Some(title)) = (value.as_object_mut(), config.document_title()) {
        obj.insert("documentTitle".to_string(), serde_json::Value::String(title));
    }
    serde_json::to_string(&value).map_err(js_err)
}

async fn fetch_text(url: &str) -> Result<String, String> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| format!("{url}: {e}"))?;
    if !resp.ok() {
        return Err(format!("{url}: HTTP {}", resp.status()));
    }
    resp.text().await.map_err(|e| format!("{url}: {e}"))
}

/// Applies a JSON-encoded navigation event. Returns the new frame.
#[wasm_bindgen]
pub fn dispatch(event: &str) -> Result<String, JsValue> {
    let event: NavEvent = serde_json::from_str(event).map_err(js_err)?;
    with_dashboard(|dash| {
        dash.handle(&event);
        frame_json(dash)
    })?
}

#[wasm_bindgen]
pub fn click(x: f64, y: f64) -> Result<String, JsValue> {
    with_dashboard(|dash| {
        dash.click_at(x, y);
        frame_json(dash)
    })?
}

#[wasm_bindgen]
pub fn double_click() -> Result<String, JsValue> {
    with_dashboard(|dash| {
        dash.double_click();
        frame_json(dash)
    })?
}

/// Tooltip JSON for the pointer position, or `undefined` over the ocean.
#[wasm_bindgen]
pub fn hover(x: f64, y: f64) -> Result<Option<String>, JsValue> {
    with_dashboard(|dash| {
        dash.hover(x, y)
            .map(|tip| serde_json::to_string(&tip).map_err(js_err))
            .transpose()
    })?
}

#[wasm_bindgen]
pub fn resize(width: f64, height: f64) -> Result<String, JsValue> {
    with_dashboard(|dash| {
        dash.resize(width, height);
        frame_json(dash)
    })?
}

/// Drag by a pointer delta in pixels.
#[wasm_bindgen]
pub fn pan(delta_x_px: f64, delta_y_px: f64) -> Result<String, JsValue> {
    with_dashboard(|dash| {
        dash.pan(delta_x_px, delta_y_px);
        frame_json(dash)
    })?
}

/// Wheel zoom around the pointer.
///
/// Intended usage: call with wheel deltaY.
#[wasm_bindgen]
pub fn zoom(x: f64, y: f64, wheel_delta_y: f64) -> Result<String, JsValue> {
    with_dashboard(|dash| {
        dash.zoom_at(x, y, (-wheel_delta_y * WHEEL_SENSITIVITY).exp());
        frame_json(dash)
    })?
}

/// Advances the viewport animation to `now_ms` (`performance.now()`).
/// Returns whether the map moved and needs a redraw.
#[wasm_bindgen]
pub fn tick(now_ms: f64) -> Result<bool, JsValue> {
    with_dashboard(|dash| dash.tick(Time::from_ms(now_ms)))
}

#[wasm_bindgen]
pub fn is_animating() -> Result<bool, JsValue> {
    with_dashboard(|dash| dash.is_animating())
}

#[wasm_bindgen]
pub fn render() -> Result<String, JsValue> {
    with_dashboard(|dash| frame_json(dash))?
}

/// Transition trace since the last call, as JSON.
#[wasm_bindgen]
pub fn take_trace() -> Result<String, JsValue> {
    with_dashboard(|dash| serde_json::to_string(&dash.drain_trace()).map_err(js_err))?
}
