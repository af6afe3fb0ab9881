// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Hysteresis debouncer for the five analog-threshold buttons.
//!
//! Each control is sampled once per loop iteration. A level above the press threshold fires a
//! single event and latches the control as held; the latch only clears once the level falls below
//! the release threshold. Levels in between leave the latch untouched, so a noisy or half-pressed
//! button neither re-fires nor releases.

use bitflags::bitflags;

use crate::control::AdcRead;

/// The five discrete controls, in the order the state machine consumes their events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "stm32f7", derive(defmt::Format))]
pub enum Button {
    Increase,
    Decrease,
    Cancel,
    Set,
    Engage,
}

impl Button {
    pub const COUNT: usize = 5;

    pub const ALL: [Button; Button::COUNT] = [
        Button::Increase,
        Button::Decrease,
        Button::Cancel,
        Button::Set,
        Button::Engage,
    ];

    /// Event flag raised by this button.
    pub fn event(self) -> ButtonEvents {
        match self {
            Button::Increase => ButtonEvents::INCREASE,
            Button::Decrease => ButtonEvents::DECREASE,
            Button::Cancel => ButtonEvents::CANCEL,
            Button::Set => ButtonEvents::SET,
            Button::Engage => ButtonEvents::ENGAGE,
        }
    }
}

bitflags! {
    /// Rising-edge events detected in one sampling pass.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonEvents: u8 {
        /// Speed +1.
        const INCREASE = 0x01;
        /// Speed -1.
        const DECREASE = 0x02;
        /// Back to Normal.
        const CANCEL   = 0x04;
        /// Enter Cruise at the current speed.
        const SET      = 0x08;
        /// Enter ACC at the current speed.
        const ENGAGE   = 0x10;
    }
}

/// Per-button held flag.
#[derive(Copy, Clone, Debug, Default)]
struct Latch {
    held: bool,
}

impl Latch {
    /// Returns `true` on the press edge only.
    fn sample(&mut self, level: u16, press: u16, release: u16) -> bool {
        if level > press && !self.held {
            self.held = true;
            true
        } else {
            if level < release {
                self.held = false;
            }
            false
        }
    }
}

pub struct Debouncer {
    latches: [Latch; Button::COUNT],
    press_threshold: u16,
    release_threshold: u16,
}

impl Debouncer {
    pub fn new(press_threshold: u16, release_threshold: u16) -> Self {
        Self {
            latches: [Latch::default(); Button::COUNT],
            press_threshold,
            release_threshold,
        }
    }

    /// Feed one raw level per button (indexed by [`Button`]) and collect the press edges.
    pub fn update(&mut self, levels: [u16; Button::COUNT]) -> ButtonEvents {
        let mut events = ButtonEvents::empty();
        for button in Button::ALL {
            let idx = button as usize;
            if self.latches[idx].sample(levels[idx], self.press_threshold, self.release_threshold)
            {
                events |= button.event();
            }
        }
        events
    }

    /// Sample every button from `adc` using the given channel map, then debounce.
    pub fn poll<A: AdcRead>(
        &mut self,
        adc: &mut A,
        channels: &[u8; Button::COUNT],
    ) -> ButtonEvents {
        let mut levels = [0u16; Button::COUNT];
        for (level, &ch) in levels.iter_mut().zip(channels.iter()) {
            *level = adc.read_channel(ch);
        }
        self.update(levels)
    }

    /// Whether `button` is currently latched as held.
    #[inline]
    pub fn is_held(&self, button: Button) -> bool {
        self.latches[button as usize].held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(button: Button, level: u16) -> [u16; Button::COUNT] {
        let mut levels = [0; Button::COUNT];
        levels[button as usize] = level;
        levels
    }

    #[test]
    fn held_press_fires_once() {
        let mut db = Debouncer::new(600, 100);

        assert_eq!(db.update(only(Button::Increase, 1023)), ButtonEvents::INCREASE);
        for _ in 0..50 {
            assert!(db.update(only(Button::Increase, 1023)).is_empty());
        }
        assert!(db.is_held(Button::Increase));
    }

    #[test]
    fn release_rearms_the_button() {
        let mut db = Debouncer::new(600, 100);

        assert_eq!(db.update(only(Button::Set, 700)), ButtonEvents::SET);
        assert!(db.update(only(Button::Set, 50)).is_empty());
        assert!(!db.is_held(Button::Set));
        assert_eq!(db.update(only(Button::Set, 700)), ButtonEvents::SET);
    }

    #[test]
    fn dead_zone_keeps_last_state() {
        let mut db = Debouncer::new(600, 100);

        // Hovering between thresholds before any press: nothing fires, nothing latches.
        assert!(db.update(only(Button::Cancel, 350)).is_empty());
        assert!(!db.is_held(Button::Cancel));

        assert_eq!(db.update(only(Button::Cancel, 601)), ButtonEvents::CANCEL);

        // Sagging into the dead zone does not release the latch...
        assert!(db.update(only(Button::Cancel, 350)).is_empty());
        assert!(db.is_held(Button::Cancel));

        // ...so bouncing back above the press threshold does not re-fire.
        assert!(db.update(only(Button::Cancel, 900)).is_empty());
    }

    #[test]
    fn thresholds_are_strict() {
        let mut db = Debouncer::new(600, 100);

        assert!(db.update(only(Button::Engage, 600)).is_empty());
        assert_eq!(db.update(only(Button::Engage, 601)), ButtonEvents::ENGAGE);

        // Exactly at the release threshold is still held.
        db.update(only(Button::Engage, 100));
        assert!(db.is_held(Button::Engage));
        db.update(only(Button::Engage, 99));
        assert!(!db.is_held(Button::Engage));
    }

    #[test]
    fn simultaneous_presses_report_together() {
        let mut db = Debouncer::new(600, 100);
        let events = db.update([800, 0, 0, 800, 800]);
        assert_eq!(
            events,
            ButtonEvents::INCREASE | ButtonEvents::SET | ButtonEvents::ENGAGE
        );
    }

    struct FixedAdc([u16; 16]);

    impl AdcRead for FixedAdc {
        fn read_channel(&mut self, ch: u8) -> u16 {
            self.0[ch as usize]
        }
    }

    #[test]
    fn poll_reads_through_channel_map() {
        let mut adc = FixedAdc([0; 16]);
        adc.0[13] = 1000;

        let mut db = Debouncer::new(600, 100);
        let events = db.poll(&mut adc, &[0, 3, 10, 13, 9]);
        assert_eq!(events, ButtonEvents::SET);
    }
}
