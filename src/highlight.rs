//! Hover/click highlight state for the technology grid, and the autonomous
//! engagement driver that cycles it on small devices until the visitor
//! clicks something.
//!
//! All delayed transitions go through named [`TimerSlot`]s owned by the
//! coordinator, so a superseding event, a click or [`TechAnimations::teardown`]
//! always cancels whatever is pending.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use crate::{
    engagement::{
        DeviceProfile, Engagement, EngagementSession, RandomSource, MOBILE_BREAKPOINT_PX,
    },
    timer::{Scheduler, TimerSlot},
};

pub const DEFAULT_LABEL: &str = "Technologies";

#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub default_label: String,
    /// How long a hovered or clicked label stays before reverting.
    pub dwell: Duration,
    /// Quiet period after mount before the driver starts.
    pub grace: Duration,
    pub cycle: Duration,
    /// Viewports narrower than this count as small devices.
    pub breakpoint_px: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_LABEL.to_string(),
            dwell: Duration::from_millis(2000),
            grace: Duration::from_millis(3000),
            cycle: Duration::from_millis(2000),
            breakpoint_px: MOBILE_BREAKPOINT_PX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightState {
    pub active_label: String,
    pub active_item: Option<String>,
}

impl HighlightState {
    pub fn idle(default_label: &str) -> Self {
        Self {
            active_label: default_label.to_string(),
            active_item: None,
        }
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_item.as_deref() == Some(name)
    }
}

pub type Listener = Box<dyn Fn(&HighlightState) + Send + Sync>;

struct Inner<S: Scheduler> {
    state: HighlightState,
    label_timer: TimerSlot<S>,
    item_timer: TimerSlot<S>,
    engagement: Engagement,
    grace_timer: TimerSlot<S>,
    cycle_timer: TimerSlot<S>,
    rng: Box<dyn RandomSource + Send>,
}

struct Shared<S: Scheduler> {
    scheduler: S,
    config: AnimationConfig,
    names: Vec<String>,
    inner: Mutex<Inner<S>>,
    listener: Listener,
}

impl<S: Scheduler> Shared<S> {
    fn lock(&self) -> MutexGuard<'_, Inner<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` under the lock and publishes the resulting state once the
    /// lock is released.
    fn update(&self, f: impl FnOnce(&S, &AnimationConfig, &mut Inner<S>)) {
        let snapshot = {
            let mut inner = self.lock();
            f(&self.scheduler, &self.config, &mut inner);
            inner.state.clone()
        };
        (self.listener)(&snapshot);
    }
}

/// Coordinator for the technology grid. Cheap to clone; clones share state.
pub struct TechAnimations<S: Scheduler> {
    shared: Arc<Shared<S>>,
}

impl<S: Scheduler> Clone for TechAnimations<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: Scheduler> TechAnimations<S> {
    pub fn new(
        scheduler: S,
        config: AnimationConfig,
        names: Vec<String>,
        rng: impl RandomSource + Send + 'static,
        listener: impl Fn(&HighlightState) + Send + Sync + 'static,
    ) -> Self {
        let inner = Inner {
            state: HighlightState::idle(&config.default_label),
            label_timer: TimerSlot::default(),
            item_timer: TimerSlot::default(),
            engagement: Engagement::Inactive,
            grace_timer: TimerSlot::default(),
            cycle_timer: TimerSlot::default(),
            rng: Box::new(rng),
        };
        Self {
            shared: Arc::new(Shared {
                scheduler,
                config,
                names,
                inner: Mutex::new(inner),
                listener: Box::new(listener),
            }),
        }
    }

    pub fn state(&self) -> HighlightState {
        self.shared.lock().state.clone()
    }

    pub fn engagement(&self) -> Engagement {
        self.shared.lock().engagement.clone()
    }

    /// Shows `name` as the label without making it the active item.
    pub fn hover_start(&self, name: &str) {
        self.shared.update(|sched, _, inner| {
            inner.label_timer.cancel(sched);
            inner.state.active_label = name.to_string();
        });
    }

    /// Reverts the label after the dwell time unless an item is active then.
    pub fn hover_end(&self) {
        let weak = Arc::downgrade(&self.shared);
        self.shared.update(|sched, config, inner| {
            inner
                .label_timer
                .schedule_once(sched, config.dwell, move || {
                    with_shared(&weak, |shared| {
                        shared.update(|_, config, inner| {
                            if inner.state.active_item.is_none() {
                                inner.state.active_label = config.default_label.clone();
                            }
                        });
                    });
                });
        });
    }

    /// Toggles `name` as the active item. Latches the visitor as interacted,
    /// which stops the engagement driver for good.
    pub fn click(&self, name: &str) {
        let weak_label = Arc::downgrade(&self.shared);
        let weak_item = weak_label.clone();
        self.shared.update(|sched, config, inner| {
            halt(sched, inner, Engagement::Interacted);
            inner.label_timer.cancel(sched);
            inner.item_timer.cancel(sched);

            if inner.state.is_active(name) {
                inner.state = HighlightState::idle(&config.default_label);
                return;
            }
            inner.state.active_item = Some(name.to_string());
            inner.state.active_label = name.to_string();

            inner.label_timer.schedule_once(sched, config.dwell, move || {
                with_shared(&weak_label, |shared| {
                    shared.update(|_, config, inner| {
                        inner.state.active_label = config.default_label.clone();
                    });
                });
            });
            inner.item_timer.schedule_once(sched, config.dwell, move || {
                with_shared(&weak_item, |shared| {
                    shared.update(|_, _, inner| inner.state.active_item = None);
                });
            });
        });
    }

    /// Arms the engagement driver if the device qualifies. The driver starts
    /// cycling after the grace period unless the visitor clicks first.
    /// Returns whether the driver was armed.
    pub fn begin_engagement(&self, profile: &DeviceProfile) -> bool {
        let shared = &self.shared;
        if shared.names.is_empty() || !profile.is_small(shared.config.breakpoint_px) {
            return false;
        }
        let mut inner = shared.lock();
        if !matches!(inner.engagement, Engagement::Inactive) {
            return false;
        }
        inner.engagement = Engagement::Pending;
        let weak = Arc::downgrade(shared);
        inner
            .grace_timer
            .schedule_once(&shared.scheduler, shared.config.grace, move || {
                with_shared(&weak, |shared| start_cycling(shared, &weak));
            });
        log::debug!(
            "engagement armed for {}px viewport",
            profile.viewport_width
        );
        true
    }

    /// Cancels every pending timer. Called when the grid unmounts.
    pub fn teardown(&self) {
        let shared = &self.shared;
        let mut inner = shared.lock();
        halt(&shared.scheduler, &mut inner, Engagement::TornDown);
        inner.label_timer.cancel(&shared.scheduler);
        inner.item_timer.cancel(&shared.scheduler);
    }
}

fn with_shared<S: Scheduler>(weak: &Weak<Shared<S>>, f: impl FnOnce(&Shared<S>)) {
    if let Some(shared) = weak.upgrade() {
        f(&shared);
    }
}

/// Stops the driver. A terminal engagement state is never overwritten.
fn halt<S: Scheduler>(sched: &S, inner: &mut Inner<S>, to: Engagement) {
    inner.grace_timer.cancel(sched);
    inner.cycle_timer.cancel(sched);
    if !inner.engagement.is_terminal() {
        if inner.engagement.is_cycling() {
            log::debug!("engagement halted: {to:?}");
        }
        inner.engagement = to;
    }
}

fn start_cycling<S: Scheduler>(shared: &Shared<S>, weak: &Weak<Shared<S>>) {
    let weak = weak.clone();
    shared.update(|sched, config, inner| {
        if !matches!(inner.engagement, Engagement::Pending) {
            return;
        }
        let Some(session) = EngagementSession::start(&shared.names, inner.rng.as_mut()) else {
            return;
        };
        show(inner, session.current());
        inner.engagement = Engagement::Cycling(session);
        inner.cycle_timer.schedule_repeating(sched, config.cycle, move || {
            with_shared(&weak, cycle_tick);
        });
    });
}

fn cycle_tick<S: Scheduler>(shared: &Shared<S>) {
    shared.update(|sched, _, inner| {
        let next = match &mut inner.engagement {
            Engagement::Cycling(session) => session.advance(inner.rng.as_mut()).to_string(),
            _ => {
                inner.cycle_timer.cancel(sched);
                return;
            }
        };
        show(inner, &next);
    });
}

fn show<S: Scheduler>(inner: &mut Inner<S>, name: &str) {
    inner.state.active_item = Some(name.to_string());
    inner.state.active_label = name.to_string();
}
