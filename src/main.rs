// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io;
use std::process;

use clap::{App, Arg};

use talos::engines;
use talos::uci::UciServer;

fn main() {
    talos::logger::initialize();

    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("UCI chess engine")
        .arg(
            Arg::with_name("engine")
                .help("Move selection strategy to serve")
                .short("e")
                .long("engine")
                .possible_values(&engines::ENGINE_NAMES)
                .default_value("alphabeta")
                .takes_value(true),
        )
        .get_matches();

    let engine = engines::by_name(matches.value_of("engine").unwrap())
        .expect("clap validated the engine name");

    let stdin = io::stdin();
    let server = UciServer::new(engine);
    if let Err(err) = server.run(stdin.lock(), io::stdout()) {
        eprintln!("i/o error on the UCI streams: {}", err);
        process::exit(1);
    }
}
