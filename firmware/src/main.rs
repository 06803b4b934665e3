// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![no_std]
#![no_main]
#![feature(abi_avr_interrupt)]
#![feature(asm_experimental_arch)]

mod analog;
mod hw;
mod mutex;
mod ports;
mod system;
mod timer;
mod triac;
mod zerocross;

use crate::{
    hw::{Peripherals, interrupt, mcu},
    mutex::{MainCtx, unwrap_option},
    ports::PortB,
    system::{SYS_PERIPH, SYSTEM, SysPeriph},
    timer::{TIMER_PERIPH, TimerPeriph, timer_init},
    zerocross::{ZEROCROSS, ZeroCross},
};

fn wdt_init() {
    // SAFETY: The asm code only accesses the WDT registers
    //         which are not accessed from anywhere else in the program.
    unsafe {
        // Enable WDT with timeout 64 ms
        core::arch::asm!(
            "ldi {tmp}, 0x10", // WDCE=1
            "out {WDTCR}, {tmp}",
            "ldi {tmp}, 0x1A", // WDCE=1, WDE=1, WDP2=0, WDP1=1, WDP0=0
            "out {WDTCR}, {tmp}",
            tmp = out(reg_upper) _,
            WDTCR = const 0x21,
            options(nostack, preserves_flags)
        );
    }
}

pub fn wdt_poke(_wp: &mcu::WDT) {
    avr_device::asm::wdr();
}

#[avr_device::entry]
fn main() -> ! {
    wdt_init();

    let dp = unwrap_option(Peripherals::take());

    let sp = SysPeriph {
        ADC: dp.ADC,
        WDT: dp.WDT,
    };
    let tp = TimerPeriph { TC0: dp.TC0 };
    let zc = ZeroCross {
        CPU: dp.CPU,
        EXINT: dp.EXINT,
    };
    let pb = PortB { PORTB: dp.PORTB };

    // # SAFETY
    //
    // This is the context handle for the main() function.
    // Holding a reference to this object proves that the holder
    // is running in main() context.
    let m = unsafe {
        MainCtx::new_with_init(|ctx| {
            pb.setup(ctx);
            zc.setup(ctx);
            ports::PORTB.init(ctx, pb);
            ZEROCROSS.init(ctx, zc);
            TIMER_PERIPH.init(ctx, tp);
            SYS_PERIPH.init(ctx, sp);
        })
    };

    timer_init(&m);
    SYSTEM.init(&m);

    // SAFETY: This must be after construction of MainCtx
    //         and after initialization of static MainInit variables.
    unsafe { interrupt::enable() };

    loop {
        // All control logic runs in the interrupt handlers.
        // The watchdog is poked by the zero-cross handler only:
        // losing the mains reference forces a reset back to the
        // safe, de-asserted output default.
        avr_device::asm::sleep();
    }
}

// vim: ts=4 sw=4 expandtab
