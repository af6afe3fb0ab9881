// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Interrupt-shared rotation pulse counter.
//!
//! The edge interrupt calls [`PulseCounter::on_edge`] once per falling edge on the rotation sensor
//! line. Every `divisor` edges become one counted pulse. The main loop drains the count with
//! [`PulseCounter::take`], which reads and clears it inside one critical section so no edge is
//! lost or counted twice across a drain.
//!
//! A drain does not clear the divider phase; partial edge groups carry over into the next
//! interval.

use core::cell::Cell;

use critical_section::Mutex;

#[derive(Copy, Clone, Debug, Default)]
struct Counts {
    /// Edges seen since the last counted pulse, always `< divisor`.
    divider: u8,
    /// Counted pulses since the last drain.
    pulses: u32,
}

pub struct PulseCounter {
    divisor: u8,
    state: Mutex<Cell<Counts>>,
}

impl PulseCounter {
    /// New counter. A `divisor` of 0 is treated as 1.
    pub const fn new(divisor: u8) -> Self {
        Self {
            divisor: if divisor == 0 { 1 } else { divisor },
            state: Mutex::new(Cell::new(Counts {
                divider: 0,
                pulses: 0,
            })),
        }
    }

    #[inline]
    pub fn divisor(&self) -> u8 {
        self.divisor
    }

    /// Register one raw edge. Called from interrupt context.
    pub fn on_edge(&self) {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut counts = cell.get();

            counts.divider += 1;
            if counts.divider >= self.divisor {
                counts.pulses = counts.pulses.wrapping_add(1);
                counts.divider = 0;
            }

            cell.set(counts);
        });
    }

    /// Atomically read and reset the pulse count.
    pub fn take(&self) -> u32 {
        critical_section::with(|cs| {
            let cell = self.state.borrow(cs);
            let mut counts = cell.get();
            let pulses = counts.pulses;
            counts.pulses = 0;
            cell.set(counts);
            pulses
        })
    }

    /// Pulses counted since the last drain, without clearing.
    pub fn pending(&self) -> u32 {
        critical_section::with(|cs| self.state.borrow(cs).get().pulses)
    }
}
