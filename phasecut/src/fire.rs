// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Firing delay derivation and trigger pulse sequencing.

use crate::timer::{Prescale, TimerConfig, compare_count};

/// Mains half-wave duration (50 Hz).
pub const HALF_PERIOD_US: u16 = 10_000;

/// The zero-cross detector pulses this long before the actual crossing.
pub const ZERO_CROSS_LEAD_US: u16 = 1_000;

/// Width of the optotriac trigger pulse.
pub const TRIGGER_PULSE_US: u16 = 250;

/// Floor for the computed firing delay. Near the top of the percentage
/// range the delay formula saturates at zero, and a countdown shorter
/// than one timer tick is not representable. Such half-cycles fire
/// right at the detector pulse instead.
const DELAY_FLOOR_US: u16 = 5;

const fn fixed_config(prescale: Prescale, us: u16) -> TimerConfig {
    match compare_count(prescale, us) {
        Some(count) => TimerConfig { prescale, count },
        None => panic!("duration does not fit the compare register"),
    }
}

/// Trigger pulse program: 250 µs at prescale 8 (compare count 149).
pub const TRIGGER_PULSE: TimerConfig = fixed_config(Prescale::By8, TRIGGER_PULSE_US);

/// Fully-on program: fire as soon as the zero-cross lead has passed
/// (1000 µs at prescale 64, compare count 74).
pub const FAST_FIRE: TimerConfig = fixed_config(Prescale::By64, ZERO_CROSS_LEAD_US);

/// Delay from the detector pulse to the trigger for the general
/// (1..=99 percent) case:
///
/// `half period - (half period / 100 * percent + zero-cross lead)`
///
/// saturating at zero and floored to [DELAY_FLOOR_US].
pub const fn firing_delay_us(percent: u8) -> u16 {
    let conduction = (HALF_PERIOD_US / 100) * percent as u16 + ZERO_CROSS_LEAD_US;
    let delay = HALF_PERIOD_US.saturating_sub(conduction);
    if delay < DELAY_FLOOR_US {
        DELAY_FLOOR_US
    } else {
        delay
    }
}

/// The delay-timer program to arm at a zero-cross pulse for `percent`
/// drive.
///
/// `None` keeps the timer off for this half-cycle: fully-off drive, or
/// (defensively) a delay no divisor/count pair can represent.
pub const fn firing_program(percent: u8) -> Option<TimerConfig> {
    match percent {
        0 => None,
        100 => Some(FAST_FIRE),
        _ => {
            let us = firing_delay_us(percent);
            let prescale = Prescale::spanning(us);
            match compare_count(prescale, us) {
                Some(count) => Some(TimerConfig { prescale, count }),
                None => None,
            }
        }
    }
}

/// Trigger sequencing across one half-cycle.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FireState {
    /// Counting down the phase delay; the trigger is de-asserted.
    AwaitingFire,
    /// The trigger pulse has been started; the next expiry ends it.
    Firing,
}

/// What a delay-timer expiry must do to the hardware.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FireAction {
    /// Assert the trigger and re-arm the timer for the pulse width.
    StartPulse(TimerConfig),
    /// De-assert the trigger. The timer stays idle until re-programmed
    /// by the next zero-cross.
    EndPulse,
}

impl FireState {
    pub const fn new() -> Self {
        FireState::AwaitingFire
    }

    /// Advance on delay-timer expiry.
    pub const fn on_expiry(self) -> (FireState, FireAction) {
        match self {
            FireState::AwaitingFire => (FireState::Firing, FireAction::StartPulse(TRIGGER_PULSE)),
            FireState::Firing => (FireState::Firing, FireAction::EndPulse),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fixed_programs() {
        assert_eq!(
            TRIGGER_PULSE,
            TimerConfig {
                prescale: Prescale::By8,
                count: 149,
            }
        );
        assert_eq!(
            FAST_FIRE,
            TimerConfig {
                prescale: Prescale::By64,
                count: 74,
            }
        );
    }

    #[test]
    fn test_firing_delay() {
        assert_eq!(firing_delay_us(1), 8900);
        assert_eq!(firing_delay_us(50), 4000);
        assert_eq!(firing_delay_us(89), 100);
        // Saturated and floored near the top of the range.
        assert_eq!(firing_delay_us(90), DELAY_FLOOR_US);
        assert_eq!(firing_delay_us(99), DELAY_FLOOR_US);

        let mut prev = u16::MAX;
        for percent in 1..=99 {
            let us = firing_delay_us(percent);
            assert!(us <= prev);
            prev = us;
        }
    }

    #[test]
    fn test_firing_program_endpoints() {
        // 0 %: the timer stays off, the output is never asserted.
        assert_eq!(firing_program(0), None);
        // 100 %: fast-fire right after the zero-cross lead.
        assert_eq!(firing_program(100), Some(FAST_FIRE));
    }

    #[test]
    fn test_firing_program_midscale() {
        // 50 %: 10000 - (100 * 50 + 1000) = 4000 µs, spanned by
        // prescale 256.
        let config = firing_program(50).unwrap();
        assert_eq!(config.prescale, Prescale::By256);
        assert_eq!(config.count, 74);
    }

    #[test]
    fn test_firing_program_always_representable() {
        for percent in 1..=99 {
            let us = firing_delay_us(percent);
            let config = firing_program(percent).unwrap();
            assert_eq!(config.prescale, Prescale::spanning(us));
            assert_eq!(Some(config.count), compare_count(config.prescale, us));
        }
    }

    #[test]
    fn test_fire_sequence() {
        let state = FireState::new();

        // First expiry: the trigger pulse starts.
        let (state, action) = state.on_expiry();
        assert_eq!(state, FireState::Firing);
        assert_eq!(action, FireAction::StartPulse(TRIGGER_PULSE));

        // Second expiry: the pulse ends, the state holds until the
        // next zero-cross resets it.
        let (state, action) = state.on_expiry();
        assert_eq!(state, FireState::Firing);
        assert_eq!(action, FireAction::EndPulse);

        // A stray extra expiry repeats the harmless de-assert.
        let (state, action) = state.on_expiry();
        assert_eq!(state, FireState::Firing);
        assert_eq!(action, FireAction::EndPulse);
    }
}

// vim: ts=4 sw=4 expandtab
