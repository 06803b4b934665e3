// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{
    hw::mcu,
    mutex::{LazyMainInit, MainInitCtx},
};

#[allow(non_snake_case)]
pub struct ZeroCross {
    pub CPU: mcu::CPU,
    pub EXINT: mcu::EXINT,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static ZEROCROSS: LazyMainInit<ZeroCross> = unsafe { LazyMainInit::uninit() };

impl ZeroCross {
    /// Configure INT0 for the zero-cross detector on PB1.
    ///
    /// The detector pulses once per mains half-cycle, leading the actual
    /// crossing by the zero-cross lead time.
    pub fn setup(&self, _: &MainInitCtx) {
        // ISC01 = 1, ISC00 = 1: interrupt on rising edge.
        // SE = 1, SM = 0: `sleep` in the idle loop enters Idle mode.
        self.CPU
            .mcucr()
            .write(|w| w.isc0().bits(0b11).se().set_bit());
        // Discard edges latched before setup.
        self.EXINT.gifr().write(|w| w.intf0().set_bit());
        self.EXINT.gimsk().write(|w| w.int0().set_bit());
    }
}

// vim: ts=4 sw=4 expandtab
