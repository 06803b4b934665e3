// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    analog::Adc,
    hw::mcu,
    mutex::{CriticalSection, IrqCtx, LazyMainInit, MainCtx},
    ports,
    timer::{timer_arm, timer_disarm},
    triac::Triac,
};
use phasecut::{fire, setpoint};

#[allow(non_snake_case)]
pub struct SysPeriph {
    pub ADC: mcu::ADC,
    pub WDT: mcu::WDT,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static SYS_PERIPH: LazyMainInit<SysPeriph> = unsafe { LazyMainInit::uninit() };

pub static SYSTEM: System = System::new();

pub struct System {
    adc: Adc,
    triac: Triac,
}

impl System {
    pub const fn new() -> Self {
        Self {
            adc: Adc::new(),
            triac: Triac::new(),
        }
    }

    pub fn init(&self, m: &MainCtx<'_>) {
        let cs = m.cs();
        let sp = SYS_PERIPH.deref(cs);

        ports::setup_didr(sp);
        self.adc.init(cs, sp);
        self.triac.set_trigger(cs, false);
        self.triac.reset(cs);
        // First conversion. Afterwards every zero-cross starts the next one.
        self.adc.start_conversion(cs, sp);
    }

    /// Zero-cross pulse: begin a new half-cycle.
    fn zero_crossing(&self, cs: CriticalSection<'_>) {
        let sp = SYS_PERIPH.deref(cs);

        // The trigger must never stay asserted across a half-cycle
        // boundary, even if the pulse-end expiry was lost.
        self.triac.set_trigger(cs, false);

        let percent = setpoint::percent(self.adc.get_result(cs));
        match fire::firing_program(percent) {
            Some(config) => timer_arm(cs, config),
            None => timer_disarm(cs),
        }

        self.triac.reset(cs);
        self.adc.start_conversion(cs, sp);

        // Mains reference present: keep the watchdog satisfied.
        // If the reference is lost, the watchdog resets the system
        // to the de-asserted output default.
        crate::wdt_poke(&sp.WDT);
    }

    /// Setpoint conversion complete: latch the result.
    fn sample_done(&self, cs: CriticalSection<'_>) {
        let sp = SYS_PERIPH.deref(cs);
        self.adc.capture(cs, sp);
    }

    /// Delay timer expiry: emit or finish the trigger pulse.
    fn delay_elapsed(&self, cs: CriticalSection<'_>) {
        self.triac.delay_elapsed(cs);
    }
}

pub fn irq_handler_int0(c: &IrqCtx) {
    SYSTEM.zero_crossing(c.cs());
}

pub fn irq_handler_adc(c: &IrqCtx) {
    SYSTEM.sample_done(c.cs());
}

pub fn irq_handler_tim0_compa(c: &IrqCtx) {
    SYSTEM.delay_elapsed(c.cs());
}

#[cfg(feature = "debug")]
#[allow(dead_code)]
pub fn debug_toggle(cs: CriticalSection<'_>) {
    let pb = ports::PORTB.deref(cs);
    pb.set(4, !pb.get(4));
}

// vim: ts=4 sw=4 expandtab
