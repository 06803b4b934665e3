// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    hw::mcu,
    mutex::{CriticalSection, LazyMainInit, MainCtx},
};
use phasecut::timer::{Prescale, TimerConfig};

#[allow(non_snake_case)]
pub struct TimerPeriph {
    pub TC0: mcu::TC0,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static TIMER_PERIPH: LazyMainInit<TimerPeriph> = unsafe { LazyMainInit::uninit() };

pub fn timer_init(m: &MainCtx<'_>) {
    let tp = TIMER_PERIPH.deref(m.cs());
    // Timer 0 configuration:
    // Normal mode, OC0A/OC0B disconnected.
    // The clock stays stopped until the first zero-cross arms a countdown.
    tp.TC0.tccr0a().write(|w| w);
    tp.TC0.tccr0b().write(|w| w);
    tp.TC0.timsk0().write(|w| w);
}

/// Stop the countdown and mask its expiry interrupt.
pub fn timer_disarm(cs: CriticalSection<'_>) {
    let tp = TIMER_PERIPH.deref(cs);
    tp.TC0.timsk0().modify(|_, w| w.ocie0a().clear_bit());
    tp.TC0.tccr0b().modify(|_, w| w.cs0().no_clock());
}

/// Stop, clear the pending expiry, reprogram and restart the countdown.
///
/// The pending-flag clear between stopping and restarting guarantees
/// that no stale expiry is delivered for the new programming.
pub fn timer_arm(cs: CriticalSection<'_>, config: TimerConfig) {
    let tp = TIMER_PERIPH.deref(cs);

    timer_disarm(cs);
    match config.prescale {
        Prescale::By8 => tp.TC0.tccr0b().modify(|_, w| w.cs0().prescale_8()),
        Prescale::By64 => tp.TC0.tccr0b().modify(|_, w| w.cs0().prescale_64()),
        Prescale::By256 => tp.TC0.tccr0b().modify(|_, w| w.cs0().prescale_256()),
    }
    tp.TC0.tifr0().write(|w| w.ocf0a().set_bit());
    // Expiry at the current counter value plus the countdown.
    let compare = tp.TC0.tcnt0().read().bits().wrapping_add(config.count);
    tp.TC0.ocr0a().write(|w| w.bits(compare));
    tp.TC0.timsk0().modify(|_, w| w.ocie0a().set_bit());
}

// vim: ts=4 sw=4 expandtab
