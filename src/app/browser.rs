use std::{cell::RefCell, time::Duration};

use leptos::prelude::*;

use crate::{
    engagement::{DeviceProfile, RandomSource},
    timer::{Scheduler, TimerError},
};

/// Timers on the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

#[derive(Debug, Clone, Copy)]
pub enum BrowserTimer {
    Timeout(TimeoutHandle),
    Interval(IntervalHandle),
}

impl Scheduler for BrowserScheduler {
    type Handle = BrowserTimer;

    fn schedule_once(
        &self,
        delay: Duration,
        callback: Box<dyn FnOnce()>,
    ) -> Result<BrowserTimer, TimerError> {
        set_timeout_with_handle(callback, delay)
            .map(BrowserTimer::Timeout)
            .map_err(|e| TimerError::Schedule(format!("{e:?}")))
    }

    fn schedule_repeating(
        &self,
        period: Duration,
        callback: Box<dyn FnMut()>,
    ) -> Result<BrowserTimer, TimerError> {
        let callback = RefCell::new(callback);
        set_interval_with_handle(move || (*callback.borrow_mut())(), period)
            .map(BrowserTimer::Interval)
            .map_err(|e| TimerError::Schedule(format!("{e:?}")))
    }

    fn cancel(&self, handle: BrowserTimer) {
        match handle {
            BrowserTimer::Timeout(h) => h.clear(),
            BrowserTimer::Interval(h) => h.clear(),
        }
    }
}

/// `Math.random` backed picks.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsRandom;

impl RandomSource for JsRandom {
    fn next_index(&mut self, len: usize) -> usize {
        let pick = (js_sys::Math::random() * len as f64).floor() as usize;
        pick.min(len.saturating_sub(1))
    }
}

pub fn user_agent() -> Option<String> {
    web_sys::window()?.navigator().user_agent().ok()
}

pub fn device_profile() -> Option<DeviceProfile> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    Some(DeviceProfile::from_window(width, user_agent()))
}
