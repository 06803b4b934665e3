// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    mutex::{CriticalSection, MutexCell},
    system::SysPeriph,
};

pub struct Adc {
    result: MutexCell<u16>,
}

impl Adc {
    pub const fn new() -> Self {
        Self {
            result: MutexCell::new(0),
        }
    }

    #[rustfmt::skip]
    pub fn init(&self, _cs: CriticalSection<'_>, sp: &SysPeriph) {
        // Setpoint potentiometer on ADC3 (PB3), Vcc reference,
        // right adjusted result.
        sp.ADC.admux().write(|w| w.mux().adc3());
        // 4.8 MHz / 64 = 75 kHz ADC clock.
        sp.ADC.adcsra().write(|w| {
            w.adps().prescaler_64()
             .adie().set_bit()
             .adif().set_bit()
             .adsc().clear_bit()
             .aden().set_bit()
        });
    }

    /// Start one conversion. The result is delivered by the ADC interrupt.
    #[inline]
    pub fn start_conversion(&self, _cs: CriticalSection<'_>, sp: &SysPeriph) {
        sp.ADC.adcsra().modify(|_, w| w.adsc().set_bit());
    }

    /// Latch a completed conversion result.
    ///
    /// The 16-bit data register read accesses ADCL before ADCH, which is
    /// the order the hardware requires for an untorn 10-bit result.
    pub fn capture(&self, cs: CriticalSection<'_>, sp: &SysPeriph) {
        self.result.set(cs, sp.ADC.adc().read().bits());
    }

    /// Most recent completed setpoint sample (0..=1023).
    pub fn get_result(&self, cs: CriticalSection<'_>) -> u16 {
        self.result.get(cs)
    }
}

// vim: ts=4 sw=4 expandtab
