use std::collections::HashSet;

/// Viewports narrower than this count as small devices.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

const MOBILE_AGENT_PATTERNS: &[&str] = &[
    "mobi",
    "android",
    "iphone",
    "ipad",
    "ipod",
    "webos",
    "blackberry",
    "iemobile",
    "opera mini",
];

pub fn is_mobile_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_AGENT_PATTERNS.iter().any(|p| ua.contains(p))
}

/// What the page knows about the device when it mounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceProfile {
    pub viewport_width: u32,
    pub user_agent: String,
}

impl DeviceProfile {
    pub fn new(viewport_width: u32, user_agent: impl Into<String>) -> Self {
        Self {
            viewport_width,
            user_agent: user_agent.into(),
        }
    }

    /// Builds a profile from raw window readings. A missing user agent leaves
    /// the width check in place.
    pub fn from_window(inner_width: f64, user_agent: Option<String>) -> Self {
        Self::new(inner_width.round() as u32, user_agent.unwrap_or_default())
    }

    /// Narrower than `breakpoint_px`, or a mobile browser at any width.
    pub fn is_small(&self, breakpoint_px: u32) -> bool {
        self.viewport_width < breakpoint_px || is_mobile_agent(&self.user_agent)
    }
}

/// Uniform index source. `len` is always non-zero.
pub trait RandomSource {
    fn next_index(&mut self, len: usize) -> usize;
}

impl<F: FnMut(usize) -> usize> RandomSource for F {
    fn next_index(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// One autonomous cycling run over the item names.
///
/// Every name is shown once before any name repeats. When the cycle is
/// exhausted the set of shown names restarts from the current name only, so
/// the name shown last is never the first one shown after the reset.
#[derive(Debug, Clone)]
pub struct EngagementSession {
    names: Vec<String>,
    shown: HashSet<String>,
    current: String,
}

impl EngagementSession {
    /// Returns `None` when there is nothing to cycle through.
    pub fn start(names: &[String], rng: &mut dyn RandomSource) -> Option<Self> {
        if names.is_empty() {
            return None;
        }
        let current = names[rng.next_index(names.len()) % names.len()].clone();
        let shown = HashSet::from([current.clone()]);
        Some(Self {
            names: names.to_vec(),
            shown,
            current,
        })
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    #[cfg(test)]
    pub(crate) fn shown(&self) -> &HashSet<String> {
        &self.shown
    }

    /// Picks the next name to surface and returns it.
    pub fn advance(&mut self, rng: &mut dyn RandomSource) -> &str {
        if self.shown.len() >= self.names.len() {
            self.shown.clear();
            self.shown.insert(self.current.clone());
        }
        let pending = self
            .names
            .iter()
            .filter(|n| !self.shown.contains(*n))
            .collect::<Vec<_>>();
        // a single name has nothing else to move to
        if pending.is_empty() {
            return &self.current;
        }
        let next = pending[rng.next_index(pending.len()) % pending.len()].clone();
        self.shown.insert(next.clone());
        self.current = next;
        &self.current
    }
}

/// Lifecycle of the autonomous driver. `Interacted` and `TornDown` are
/// terminal: no transition leaves them.
#[derive(Debug, Clone, Default)]
pub enum Engagement {
    #[default]
    Inactive,
    Pending,
    Cycling(EngagementSession),
    Interacted,
    TornDown,
}

impl Engagement {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Interacted | Self::TornDown)
    }

    pub fn is_cycling(&self) -> bool {
        matches!(self, Self::Cycling(_))
    }
}
