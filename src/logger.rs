// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A `log` backend that renders records as UCI `info string` lines, so
//! diagnostics flow through the same channel a chess UI already reads.
use log::{Level, LevelFilter, Metadata, Record};
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

struct UciLogger;

impl log::Log for UciLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // The thinking behind this is:
        //  debug/info - verbose, shown only after `debug on`
        //  warn/error - indicate something is wrong and always on
        if DEBUG_ENABLED.load(Ordering::Relaxed) {
            true
        } else {
            metadata.level() <= Level::Warn
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("info string {}: {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: UciLogger = UciLogger;

pub fn initialize() {
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(LevelFilter::Trace));
}

pub fn debug_enable() {
    DEBUG_ENABLED.store(true, Ordering::Release);
}

pub fn debug_disable() {
    DEBUG_ENABLED.store(false, Ordering::Release);
}
