use std::fmt;

use serde::{Deserialize, Serialize};

pub const VISITED_KEY: &str = "visited";
pub const VISITED_VALUE: &str = "true";
pub const NOTIFY_ENDPOINT: &str = "/api/notify";

const BOT_IDENTIFIERS: &[&str] = &[
    "bot",
    "spider",
    "crawl",
    "crawler",
    "prerender",
    "headless",
    "lighthouse",
    "pingdom",
    "pagespeed",
    "googlebot",
    "chrome-lighthouse",
    "gtmetrix",
];

pub fn is_bot(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    BOT_IDENTIFIERS.iter().any(|id| ua.contains(id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceType {
    Mobile,
    Desktop,
}

impl DeviceType {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        if ua.contains("mobi") || ua.contains("android") {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mobile => write!(f, "Mobile"),
            Self::Desktop => write!(f, "Desktop"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub device_type: DeviceType,
    pub user_agent: String,
}

/// Persistent browser-local key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Writes `value` only if `key` is absent. Returns whether it wrote.
    fn set_once(&self, key: &str, value: &str) -> bool;
}

/// Fire-and-forget delivery of a visitor notification. Implementations must
/// not block and must swallow their own failures.
pub trait Notifier {
    fn notify(&self, payload: NotificationPayload);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    AlreadyVisited,
    BotSkipped,
    Notified(DeviceType),
}

/// Sends at most one notification per browser.
///
/// Bots are skipped without touching the visited flag, so a person later
/// using the same browser is still reported.
pub fn notify_first_visit(
    store: &impl KeyValueStore,
    notifier: &impl Notifier,
    user_agent: &str,
) -> GateOutcome {
    if store.get(VISITED_KEY).is_some() {
        return GateOutcome::AlreadyVisited;
    }
    if is_bot(user_agent) {
        log::debug!("skipping visitor notification for bot agent");
        return GateOutcome::BotSkipped;
    }
    let device_type = DeviceType::from_user_agent(user_agent);
    if !store.set_once(VISITED_KEY, VISITED_VALUE) {
        return GateOutcome::AlreadyVisited;
    }
    notifier.notify(NotificationPayload {
        device_type,
        user_agent: user_agent.to_string(),
    });
    GateOutcome::Notified(device_type)
}
