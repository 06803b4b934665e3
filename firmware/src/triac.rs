// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    mutex::{CriticalSection, MutexCell},
    ports::PORTB,
    timer::timer_arm,
};
use phasecut::fire::{FireAction, FireState};

/// Optotriac trigger output: PB0, active high.
const TRIGGER_PIN: usize = 0;

pub struct Triac {
    state: MutexCell<FireState>,
}

impl Triac {
    pub const fn new() -> Self {
        Self {
            state: MutexCell::new(FireState::new()),
        }
    }

    /// Drive the optotriac gate.
    pub fn set_trigger(&self, cs: CriticalSection<'_>, trigger: bool) {
        PORTB.deref(cs).set(TRIGGER_PIN, trigger);
    }

    /// Restart the firing sequence for a new half-cycle.
    pub fn reset(&self, cs: CriticalSection<'_>) {
        self.state.set(cs, FireState::new());
    }

    /// Apply one delay-timer expiry to the output.
    pub fn delay_elapsed(&self, cs: CriticalSection<'_>) {
        let (state, action) = self.state.get(cs).on_expiry();
        self.state.set(cs, state);
        match action {
            FireAction::StartPulse(pulse) => {
                self.set_trigger(cs, true);
                timer_arm(cs, pulse);
            }
            FireAction::EndPulse => {
                self.set_trigger(cs, false);
            }
        }
    }
}

// vim: ts=4 sw=4 expandtab
