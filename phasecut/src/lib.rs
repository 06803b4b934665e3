// -*- coding: utf-8 -*-
// Copyright (C) 2025 Michael Büsch <m@bues.ch>
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Phase-cut firing computation for a mains-synchronized triac dimmer.
//!
//! Everything in this crate is pure arithmetic over build-time calibration
//! constants. It never touches a hardware register, so it also builds and
//! tests on the host.

#![no_std]

pub mod fire;
pub mod setpoint;
pub mod timer;

// vim: ts=4 sw=4 expandtab
