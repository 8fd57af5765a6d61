use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use thiserror::Error;
#[cfg(feature = "hydrate")]
use wasm_bindgen::{JsCast, JsValue};
#[cfg(feature = "hydrate")]
use wasm_bindgen_futures::JsFuture;
#[cfg(feature = "hydrate")]
use web_sys::{Headers, RequestInit, Response};

#[cfg(feature = "hydrate")]
use super::browser::user_agent;
#[cfg(feature = "hydrate")]
use crate::visitor::{
    notify_first_visit, KeyValueStore, NotificationPayload, Notifier, NOTIFY_ENDPOINT,
};

/// `window.localStorage`. Unavailable storage reads as empty and refuses
/// writes.
#[cfg(feature = "hydrate")]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
impl BrowserStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set_once(&self, key: &str, value: &str) -> bool {
        let Some(storage) = Self::storage() else {
            return false;
        };
        if storage.get_item(key).ok().flatten().is_some() {
            return false;
        }
        storage.set_item(key, value).is_ok()
    }
}

#[cfg(feature = "hydrate")]
#[derive(Error, Debug)]
enum FetchError {
    #[error("no window")]
    NoWindow,
    #[error("{0}")]
    Js(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(feature = "hydrate")]
impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::Js(format!("{value:?}"))
    }
}

#[cfg(feature = "hydrate")]
async fn post_json(url: &str, payload: &NotificationPayload) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;
    let body = serde_json::to_string(payload)?;

    let headers = Headers::new()?;
    headers.set("Content-Type", "application/json")?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));

    let res = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await?
        .dyn_into::<Response>()?;
    let json = JsFuture::from(res.json()?).await?;
    Ok(js_sys::JSON::stringify(&json)?.into())
}

/// POSTs to the notify endpoint without waiting on the result.
#[cfg(feature = "hydrate")]
pub struct FetchNotifier;

#[cfg(feature = "hydrate")]
impl Notifier for FetchNotifier {
    fn notify(&self, payload: NotificationPayload) {
        leptos::task::spawn_local(async move {
            match post_json(NOTIFY_ENDPOINT, &payload).await {
                Ok(res) => log::info!("Email notification sent: {res}"),
                Err(e) => log::error!("Failed to send email notification: {e}"),
            }
        });
    }
}

/// Reports the first visit from this browser once the page has mounted.
pub fn use_visitor_notification() {
    Effect::new(move |_| {
        #[cfg(feature = "hydrate")]
        {
            let Some(user_agent) = user_agent() else {
                return;
            };
            let outcome = notify_first_visit(&BrowserStorage, &FetchNotifier, &user_agent);
            log::debug!("visitor gate: {outcome:?}");
        }
    });
}
