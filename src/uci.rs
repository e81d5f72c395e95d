// Copyright 2023 The Talos Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The UCI dialogue loop. Reads commands line by line, keeps the current
//! position in sync with the UI, and hands `go` requests to the configured
//! engine. The loop is generic over its reader and writer so tests can
//! drive it with in-memory buffers.
use std::io::{self, BufRead, Write};

use crate::engines::{Clocks, Engine};
use crate::logger;
use crate::moves::Move;
use crate::position::{Position, START_FEN};

pub struct UciServer {
    pos: Position,
    engine: Box<dyn Engine>,
}

impl UciServer {
    pub fn new(engine: Box<dyn Engine>) -> UciServer {
        UciServer {
            pos: Position::from_start_position(),
            engine,
        }
    }

    pub fn run<R, W>(mut self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        for maybe_line in reader.lines() {
            let line = maybe_line?;
            let components: Vec<_> = line.split_whitespace().collect();
            match components.split_first().unwrap_or((&"", &[])) {
                (&"uci", []) => self.handle_uci(&mut writer)?,
                (&"isready", []) => writeln!(writer, "readyok")?,
                (&"debug", ["on"]) => logger::debug_enable(),
                (&"debug", ["off"]) => logger::debug_disable(),
                (&"ucinewgame", []) => self.pos = Position::from_start_position(),
                (&"position", args) => self.handle_position(&mut writer, args)?,
                (&"go", args) => self.handle_go(&mut writer, args)?,
                (&"stop", []) => {}
                (&"quit", []) => break,
                (&"", []) => {}
                _ => writeln!(writer, "info string unrecognized command: {}", line)?,
            }
        }

        Ok(())
    }

    fn handle_uci<W: Write>(&mut self, w: &mut W) -> io::Result<()> {
        writeln!(
            w,
            "id name {} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            self.engine.name()
        )?;
        writeln!(w, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
        writeln!(w, "uciok")
    }

    fn handle_position<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let move_idx = args
            .iter()
            .position(|&arg| arg == "moves")
            .unwrap_or_else(|| args.len());
        let moves: &[&str] = if move_idx < args.len() {
            &args[move_idx + 1..]
        } else {
            &[]
        };

        let fen = if let Some(idx) = args.iter().position(|&arg| arg == "fen") {
            args[idx + 1..move_idx].join(" ")
        } else if args.contains(&"startpos") {
            START_FEN.to_owned()
        } else {
            writeln!(w, "info string invalid position command")?;
            return Ok(());
        };

        self.pos = match Position::from_fen(&fen) {
            Ok(pos) => pos,
            Err(err) => {
                writeln!(w, "info string invalid fen: {}", err)?;
                return Ok(());
            }
        };

        for token in moves {
            let mov: Move = match token.parse() {
                Ok(mov) => mov,
                Err(err) => {
                    writeln!(w, "info string invalid move {}: {}", token, err)?;
                    break;
                }
            };
            if self.pos.legal_moves().contains(&mov) {
                self.pos.make_move(mov);
            } else {
                writeln!(w, "info string illegal move: {}", token)?;
                break;
            }
        }

        Ok(())
    }

    fn handle_go<W: Write>(&mut self, w: &mut W, args: &[&str]) -> io::Result<()> {
        let clocks = parse_clocks(args);
        match self.engine.choose_move(&self.pos, &clocks) {
            Some(mov) => writeln!(w, "bestmove {}", mov),
            None => writeln!(w, "bestmove 0000"),
        }
    }
}

fn parse_clocks(args: &[&str]) -> Clocks {
    let mut clocks = Clocks::default();
    let mut i = 0;
    while i < args.len() {
        let value = args.get(i + 1).and_then(|v| v.parse::<u64>().ok());
        match args[i] {
            "wtime" => clocks.wtime = value,
            "btime" => clocks.btime = value,
            "winc" => clocks.winc = value,
            "binc" => clocks.binc = value,
            "movetime" => clocks.movetime = value,
            _ => {
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    clocks
}
