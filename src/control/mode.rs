// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operating-mode state machine.
//!
//! Every control cycle runs in two phases:
//!
//! 1. **Transitions**: debounced button events, in fixed priority order (increase, decrease, set,
//!    engage, cancel). Increase/decrease nudge the commanded speed in any mode.
//! 2. **Mode behaviour**, applied every cycle whether or not a transition just happened:
//!    - Normal: the commanded speed is left alone.
//!    - Cruise: the commanded speed is forced to the set speed.
//!    - ACC: one unit down per cycle while an obstacle is within the safety distance (with the
//!      hazard blink), otherwise one unit up per cycle toward the set speed; then capped at the
//!      ceiling captured on entry.
//!
//! Adjustment is per cycle, not per unit time, so ACC responsiveness scales with the loop rate.

use core::fmt;

use crate::config::ControllerConfig;
use crate::control::actuation::{self, DriveCommand};
use crate::control::{ButtonEvents, Interval};

/// Operating mode of the speed controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "stm32f7", derive(defmt::Format))]
pub enum ControlMode {
    /// Manual speed control via increase/decrease.
    #[default]
    Normal,

    /// Hold the speed captured when cruise was set.
    Cruise,

    /// Adaptive cruise: hold the captured speed, back off for close obstacles.
    Acc,
}

impl fmt::Display for ControlMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            ControlMode::Normal => "Normal",
            ControlMode::Cruise => "Cruise",
            ControlMode::Acc => "ACC",
        })
    }
}

/// Logical state of the two status lamps.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "stm32f7", derive(defmt::Format))]
pub struct IndicatorState {
    pub primary: bool,
    pub secondary: bool,
}

impl IndicatorState {
    pub const NORMAL: Self = Self {
        primary: false,
        secondary: true,
    };
    pub const CRUISE: Self = Self {
        primary: true,
        secondary: false,
    };

    /// Both lamps at the same level (ACC clear road, or one phase of the hazard blink).
    #[inline]
    pub const fn both(on: bool) -> Self {
        Self {
            primary: on,
            secondary: on,
        }
    }
}

/// Mode state plus the speed values the modes operate on.
pub struct ModeController {
    mode: ControlMode,

    /// Running commanded speed. May leave [0, 100] transiently inside a cycle; the actuation
    /// clamp brings it back before it is used.
    commanded_speed: i32,

    /// Hold target captured on entering Cruise or ACC.
    set_speed: i32,

    /// ACC cap captured on entering ACC. Stale outside ACC.
    speed_ceiling: i32,

    safe_distance_cm: f32,

    blink: Interval,
    blink_on: bool,

    /// Whether the last ACC evaluation saw an obstacle inside the safety distance.
    obstacle: bool,

    indicators: IndicatorState,
}

impl ModeController {
    pub fn new(safe_distance_cm: f32, blink_interval_ms: u32) -> Self {
        Self {
            mode: ControlMode::Normal,
            commanded_speed: 0,
            set_speed: 0,
            speed_ceiling: 0,
            safe_distance_cm,
            blink: Interval::new(blink_interval_ms),
            blink_on: false,
            obstacle: false,
            indicators: IndicatorState::default(),
        }
    }

    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self::new(cfg.safe_distance_cm, cfg.blink_interval_ms)
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    #[inline]
    pub fn commanded_speed(&self) -> i32 {
        self.commanded_speed
    }

    #[inline]
    pub fn set_speed(&self) -> i32 {
        self.set_speed
    }

    #[inline]
    pub fn speed_ceiling(&self) -> i32 {
        self.speed_ceiling
    }

    #[inline]
    pub fn indicators(&self) -> IndicatorState {
        self.indicators
    }

    /// True while ACC is braking for an obstacle (indicators are blinking).
    #[inline]
    pub fn hazard_active(&self) -> bool {
        self.mode == ControlMode::Acc && self.obstacle
    }

    /// Overwrite the running speed, e.g. to seed a bench test. Mode logic still applies next cycle.
    pub fn set_commanded_speed(&mut self, speed: i32) {
        self.commanded_speed = speed;
    }

    /// Apply this cycle's button events in priority order.
    pub fn handle_events(&mut self, events: ButtonEvents) {
        if events.contains(ButtonEvents::INCREASE) {
            self.commanded_speed += 1;
        }
        if events.contains(ButtonEvents::DECREASE) {
            self.commanded_speed -= 1;
        }
        if events.contains(ButtonEvents::SET) {
            self.set_speed = self.commanded_speed;
            self.enter(ControlMode::Cruise);
        }
        if events.contains(ButtonEvents::ENGAGE) {
            self.set_speed = self.commanded_speed;
            self.speed_ceiling = self.commanded_speed;
            self.enter(ControlMode::Acc);
        }
        if events.contains(ButtonEvents::CANCEL) {
            self.enter(ControlMode::Normal);
        }
    }

    /// Per-cycle mode behaviour.
    pub fn update(&mut self, distance_cm: f32, now_ms: u32) {
        match self.mode {
            ControlMode::Normal => {
                self.obstacle = false;
                self.indicators = IndicatorState::NORMAL;
            }

            ControlMode::Cruise => {
                self.obstacle = false;
                self.indicators = IndicatorState::CRUISE;
                self.commanded_speed = self.set_speed;
            }

            ControlMode::Acc => {
                self.obstacle = distance_cm <= self.safe_distance_cm;

                if self.obstacle {
                    if self.blink.poll(now_ms) {
                        self.blink_on = !self.blink_on;
                        self.indicators = IndicatorState::both(self.blink_on);
                    }
                    if self.commanded_speed > 0 {
                        self.commanded_speed -= 1;
                    }
                } else {
                    self.indicators = IndicatorState::both(true);
                    if self.commanded_speed < self.set_speed {
                        self.commanded_speed += 1;
                    }
                }

                if self.commanded_speed > self.speed_ceiling {
                    self.commanded_speed = self.speed_ceiling;
                }
            }
        }
    }

    /// Transitions followed by mode behaviour.
    pub fn step(&mut self, events: ButtonEvents, distance_cm: f32, now_ms: u32) {
        self.handle_events(events);
        self.update(distance_cm, now_ms);
    }

    /// Clamp the running speed into range, store it, and map it to a drive command.
    pub fn actuate(&mut self) -> DriveCommand {
        let cmd = DriveCommand::from_speed(self.commanded_speed);
        self.commanded_speed = actuation::clamp_speed(self.commanded_speed) as i32;
        cmd
    }

    fn enter(&mut self, next: ControlMode) {
        if self.mode != next {
            log_info!("mode {} -> {} at speed {}", self.mode, next, self.commanded_speed);
        }
        self.mode = next;
    }
}
