//! Device geolocation.

#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue, closure::Closure};

use crate::net::types::Coords;
use crate::state::weather::WeatherError;

/// Ask the browser for the current position.
///
/// # Errors
///
/// [`WeatherError::GeolocationUnsupported`] when the API is missing and
/// [`WeatherError::Location`] when the lookup is refused or fails.
pub async fn current_position() -> Result<Coords, WeatherError> {
    #[cfg(feature = "hydrate")]
    {
        let geo = web_sys::window()
            .and_then(|w| w.navigator().geolocation().ok())
            .ok_or(WeatherError::GeolocationUnsupported)?;

        let promise = js_sys::Promise::new(&mut |resolve, reject| {
            let ok = Closure::once_into_js(move |pos: JsValue| {
                let _ = resolve.call1(&JsValue::NULL, &pos);
            });
            let err = Closure::once_into_js(move |e: JsValue| {
                let _ = reject.call1(&JsValue::NULL, &e);
            });
            if let Err(e) = geo.get_current_position_with_error_callback(ok.unchecked_ref(), Some(err.unchecked_ref())) {
                let _ = reject.call1(&JsValue::NULL, &e);
            }
        });

        let position = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(|e| WeatherError::Location(js_message(&e)))?;
        let coords = js_sys::Reflect::get(&position, &JsValue::from_str("coords"))
            .map_err(|e| WeatherError::Location(js_message(&e)))?;
        let read = |key: &str| js_sys::Reflect::get(&coords, &JsValue::from_str(key)).ok().and_then(|v| v.as_f64());
        match (read("latitude"), read("longitude")) {
            (Some(lat), Some(lon)) => Ok(Coords { lat, lon }),
            _ => Err(WeatherError::Location("position unavailable".to_owned())),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(WeatherError::GeolocationUnsupported)
    }
}

/// `error.message` of a JS error value, or its string form.
#[cfg(feature = "hydrate")]
fn js_message(value: &JsValue) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "unknown error".to_owned())
}
