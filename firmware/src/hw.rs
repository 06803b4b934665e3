// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

pub use attiny::{self as mcu, Peripherals};
pub use avr_device::attiny13a as attiny;
pub use avr_device::interrupt::{self, Mutex};

use crate::mutex::IrqCtx;

macro_rules! define_isr {
    ($name:ident, $handler:path) => {
        #[avr_device::interrupt(attiny13a)]
        fn $name() {
            // SAFETY: We are inside of an interrupt handler.
            // Therefore, it is safe to construct an `IrqCtx`.
            let c = unsafe { IrqCtx::new() };
            $handler(&c);
        }
    };
}

define_isr!(INT0, crate::system::irq_handler_int0);
define_isr!(ADC, crate::system::irq_handler_adc);
define_isr!(TIM0_COMPA, crate::system::irq_handler_tim0_compa);

// vim: ts=4 sw=4 expandtab
