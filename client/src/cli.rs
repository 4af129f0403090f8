use std::{fmt::Write, io, process::exit, time::Duration};

use anyhow::{bail, ensure, Context};
use libautomata::{board::CellState, pos::Position, rule::RuleKind};

use crate::{read_state, ticker, write_state, SharedState};

#[derive(Debug, PartialEq, Eq)]
enum Response {
    Ok,
    Message(String),
    Exit,
}

pub fn run_cli(state_arc: SharedState) {
    for line_res in io::stdin().lines() {
        let line = match line_res {
            Ok(line) => line,
            Err(e) => {
                log::error!("Couldn't read from stdin: {e}");
                break;
            }
        };

        match handle_cmd(&state_arc, line.split_whitespace()) {
            Ok(Response::Ok) => println!("OK"),
            Ok(Response::Message(message)) => {
                println!("{message}");
                println!("OK");
            }
            Ok(Response::Exit) => exit(0),
            Err(e) => eprintln!("! {e:#}"),
        }
    }
}

fn handle_cmd<'a, I>(state_arc: &SharedState, mut args: I) -> anyhow::Result<Response>
where
    I: Iterator<Item = &'a str>,
{
    let cmd = args.next().context("No command")?;
    log::debug!("Command: {cmd}");

    match cmd {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = write_state(state_arc);
            ensure!(!state.is_running(), "Stop the simulation before stepping");
            state.game.step_many(times);
        }

        "run" => {
            let interval = match args.next() {
                Some(rate) => Duration::from_millis(rate.parse()?),
                None => read_state(state_arc).config.tick_interval(),
            };
            ensure!(!interval.is_zero(), "Tick interval must be non-zero");

            ticker::start(state_arc, interval);
        }

        "stop" => {
            ticker::stop(state_arc);
        }

        "clear" => {
            write_state(state_arc).game.clear();
        }

        "random" => {
            let density = args.next().map(str::parse::<f64>).transpose()?;

            write_state(state_arc).randomize(density)?;
        }

        "rule" => {
            let key = args.next().context("missing rule")?;
            let rule = RuleKind::from_key(key)?;

            write_state(state_arc).game.set_rule(rule);
        }

        "rules" => {
            let active = read_state(state_arc).game.rule_kind();

            let mut listing = String::new();
            for kind in RuleKind::all() {
                let marker = if kind == active { '*' } else { ' ' };
                writeln!(listing, "{marker} {:<14} {}", kind.key(), kind.rule().name())?;
            }

            return Ok(Response::Message(listing.trim_end().to_owned()));
        }

        "brush" => {
            let brush = args
                .next()
                .context("missing state")?
                .parse::<CellState>()?;

            write_state(state_arc).brush = brush;
        }

        "paint" => {
            let x = args.next().context("missing x")?.parse::<usize>()?;
            let y = args.next().context("missing y")?.parse::<usize>()?;
            let explicit_state = args.next().map(str::parse::<CellState>).transpose()?;

            let mut state = write_state(state_arc);
            ensure!(!state.is_running(), "Stop the simulation before painting");

            let paint_state = explicit_state.unwrap_or(state.brush);
            state.game.paint(Position { x, y }, paint_state)?;
        }

        "resize" => {
            let width = args.next().context("missing width")?.parse::<usize>()?;
            let height = args.next().context("missing height")?.parse::<usize>()?;

            write_state(state_arc).game.resize(width, height)?;
        }

        "status" => {
            return Ok(Response::Message(status(state_arc)?));
        }

        "exit" => {
            return Ok(Response::Exit);
        }

        _ => bail!("Unknown command"),
    }

    Ok(Response::Ok)
}

fn status(state_arc: &SharedState) -> anyhow::Result<String> {
    let state = read_state(state_arc);
    let game = &state.game;

    let mut status = String::new();
    writeln!(status, "rule: {} ({})", game.rule_kind(), game.rule().name())?;
    writeln!(
        status,
        "size: {}x{}",
        game.board().width(),
        game.board().height()
    )?;
    writeln!(status, "generation: {}", game.generation())?;
    writeln!(status, "running: {}", state.is_running())?;
    writeln!(status, "brush: {}", state.brush)?;

    write!(status, "population:")?;
    for (cell_state, count) in game.population().into_iter().enumerate() {
        if count > 0 {
            write!(status, " {cell_state}={count}")?;
        }
    }

    Ok(status)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, RwLock};

    use crate::{config::Config, State};

    use super::*;

    fn shared_state() -> SharedState {
        let config = Config {
            board_width: 5,
            board_height: 5,
            ..Config::default()
        };

        Arc::new(RwLock::new(State::new(config).unwrap()))
    }

    fn run(state_arc: &SharedState, line: &str) -> anyhow::Result<Response> {
        handle_cmd(state_arc, line.split_whitespace())
    }

    #[test]
    fn paint_and_step_a_blinker() {
        let state_arc = shared_state();

        for x in 1..=3 {
            run(&state_arc, &format!("paint {x} 2")).unwrap();
        }
        run(&state_arc, "step").unwrap();

        let state = read_state(&state_arc);
        let column = (1..=3)
            .map(|y| *state.game.board().tile(Position { x: 2, y }).unwrap())
            .collect::<Vec<_>>();
        assert_eq!(column, vec![1, 1, 1]);
        assert_eq!(state.game.board().population(), vec![22, 3]);
        assert_eq!(state.game.generation(), 1);
    }

    #[test]
    fn rule_switch_and_listing() {
        let state_arc = shared_state();

        run(&state_arc, "rule wireworld").unwrap();
        assert_eq!(read_state(&state_arc).game.rule_kind(), RuleKind::WireWorld);

        let Response::Message(listing) = run(&state_arc, "rules").unwrap() else {
            panic!("rules should list something");
        };
        assert_eq!(listing.lines().count(), 4);
        assert!(listing.lines().any(|line| line.starts_with("* wireworld")));

        assert!(run(&state_arc, "rule highlife").is_err());
    }

    #[test]
    fn brush_sets_default_paint_state() {
        let state_arc = shared_state();

        run(&state_arc, "brush 3").unwrap();
        run(&state_arc, "paint 0 0").unwrap();
        run(&state_arc, "paint 1 0 2").unwrap();

        let state = read_state(&state_arc);
        assert_eq!(state.game.board().tiles()[..2], [3, 2]);
    }

    #[test]
    fn clear_random_resize() {
        let state_arc = shared_state();

        run(&state_arc, "random 1").unwrap();
        assert!(read_state(&state_arc).game.board().tiles().iter().all(|&t| t == 1));

        run(&state_arc, "clear").unwrap();
        assert!(read_state(&state_arc).game.board().tiles().iter().all(|&t| t == 0));

        run(&state_arc, "resize 7 3").unwrap();
        assert_eq!(read_state(&state_arc).game.board().width(), 7);

        assert!(run(&state_arc, "random 2").is_err());
        assert!(run(&state_arc, "resize 0 3").is_err());
    }

    #[test]
    fn status_report() {
        let state_arc = shared_state();
        run(&state_arc, "clear").unwrap();
        run(&state_arc, "paint 0 0").unwrap();

        let Response::Message(status) = run(&state_arc, "status").unwrap() else {
            panic!("status should report something");
        };

        assert!(status.contains("rule: conway"));
        assert!(status.contains("size: 5x5"));
        assert!(status.contains("running: false"));
        assert!(status.ends_with("population: 0=24 1=1"));
    }

    #[test]
    fn painting_and_stepping_rejected_while_running() {
        let state_arc = shared_state();

        run(&state_arc, "run 1000").unwrap();
        assert!(read_state(&state_arc).is_running());

        assert!(run(&state_arc, "paint 0 0").is_err());
        assert!(run(&state_arc, "step").is_err());

        run(&state_arc, "stop").unwrap();
        assert!(!read_state(&state_arc).is_running());
        assert!(run(&state_arc, "paint 0 0").is_ok());
    }

    #[test]
    fn bad_input() {
        let state_arc = shared_state();

        assert!(run(&state_arc, "").is_err());
        assert!(run(&state_arc, "dance").is_err());
        assert!(run(&state_arc, "paint 9 9").is_err());
        assert!(run(&state_arc, "step many").is_err());
        assert!(run(&state_arc, "run 0").is_err());
        assert!(!read_state(&state_arc).is_running());
        assert_eq!(run(&state_arc, "exit").unwrap(), Response::Exit);
    }
}
