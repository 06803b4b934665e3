// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![allow(unused_unsafe)]

use crate::{
    hw::mcu,
    mutex::{LazyMainInit, MainInitCtx},
    system::SysPeriph,
};

#[allow(non_snake_case)]
pub struct PortB {
    pub PORTB: mcu::PORTB,
}

// SAFETY: Is initialized when constructing the MainCtx.
pub static PORTB: LazyMainInit<PortB> = unsafe { LazyMainInit::uninit() };

impl PortB {
    #[inline(always)]
    pub fn get(&self, bit: usize) -> bool {
        match bit {
            0 => self.PORTB.pinb().read().pb0().bit(),
            1 => self.PORTB.pinb().read().pb1().bit(),
            2 => self.PORTB.pinb().read().pb2().bit(),
            3 => self.PORTB.pinb().read().pb3().bit(),
            4 => self.PORTB.pinb().read().pb4().bit(),
            5 => self.PORTB.pinb().read().pb5().bit(),
            _ => unreachable!(),
        }
    }

    #[inline(always)]
    pub fn set(&self, bit: usize, value: bool) {
        match bit {
            0 => self.PORTB.portb().modify(|_, w| w.pb0().bit(value)),
            1 => self.PORTB.portb().modify(|_, w| w.pb1().bit(value)),
            2 => self.PORTB.portb().modify(|_, w| w.pb2().bit(value)),
            3 => self.PORTB.portb().modify(|_, w| w.pb3().bit(value)),
            4 => self.PORTB.portb().modify(|_, w| w.pb4().bit(value)),
            5 => self.PORTB.portb().modify(|_, w| w.pb5().bit(value)),
            _ => unreachable!(),
        };
    }
}

fn pin_input(_bit: usize) -> u8 {
    0
}
fn pin_output(bit: usize) -> u8 {
    1 << bit
}
fn pin_low(_bit: usize) -> u8 {
    0
}
fn pin_floating(_bit: usize) -> u8 {
    0
}
fn pin_debug(bit: usize) -> u8 {
    if cfg!(feature = "debug") {
        pin_output(bit)
    } else {
        pin_input(bit)
    }
}

impl PortB {
    pub fn setup(&self, _: &MainInitCtx) {
        // SAFETY: Called with interrupts disabled. Ensured by &MainInitCtx.
        unsafe {
            self.PORTB.portb().write(|w| {
                w.bits(
                    pin_low(0) | // optotriac trigger, active high
                    pin_floating(1) | // zero-cross detector, INT0
                    pin_floating(2) | // DNC
                    pin_floating(3) | // setpoint, single ended ADC
                    pin_low(4) | // debug
                    pin_floating(5), // RESET
                )
            });
            self.PORTB.ddrb().write(|w| {
                w.bits(
                    pin_output(0) | // optotriac trigger, active high
                    pin_input(1) | // zero-cross detector, INT0
                    pin_input(2) | // DNC
                    pin_input(3) | // setpoint, single ended ADC
                    pin_debug(4) | // debug
                    pin_input(5), // RESET
                )
            });
        }
    }
}

#[rustfmt::skip]
pub fn setup_didr(sp: &SysPeriph) {
    sp.ADC.didr0().write(|w| {
        w.adc0d().clear_bit()
         .adc1d().clear_bit()
         .adc2d().clear_bit()
         .adc3d().set_bit() // PB3: setpoint ADC
         .ain0d().clear_bit()
         .ain1d().clear_bit()
    });
}

// vim: ts=4 sw=4 expandtab
