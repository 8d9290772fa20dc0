use std::time::{Duration, Instant};

use crate::config::SlotConfig;

/// One scheduled task's trigger window.
///
/// A task fires when the local minute is 0, the local hour is in its trigger
/// set and the slot flag is clear. Firing sets the flag; [`TaskSlot::tick`]
/// clears it again once the cooldown has elapsed, so a task fires at most
/// once per trigger window even though the poll loop re-evaluates every
/// second of the trigger minute.
#[derive(Debug)]
pub struct TaskSlot {
    hours: Vec<u32>,
    cooldown: Duration,
    fired_at: Option<Instant>,
}

impl TaskSlot {
    pub fn new(config: &SlotConfig) -> Self {
        TaskSlot {
            hours: config.hours.clone(),
            cooldown: Duration::from_secs(config.cooldown_secs),
            fired_at: None,
        }
    }

    pub fn due(&self, hour: u32, minute: u32) -> bool {
        minute == 0 && self.hours.contains(&hour) && self.fired_at.is_none()
    }

    pub fn mark_fired(&mut self) {
        self.mark_fired_at(Instant::now());
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    fn mark_fired_at(&mut self, now: Instant) {
        self.fired_at = Some(now);
    }

    fn tick_at(&mut self, now: Instant) {
        if let Some(fired) = self.fired_at {
            if now.duration_since(fired) >= self.cooldown {
                self.fired_at = None;
            }
        }
    }
}
