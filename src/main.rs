//! Air Hockey headless driver
//!
//! Runs a scripted match on a fixed timestep and logs what happens.
//!
//! Usage: `air-hockey [SETTINGS.json] [--practice] [--ticks N]`

#[cfg(not(target_arch = "wasm32"))]
use air_hockey::{
    EngineError, Settings, Side,
    sim::{Command, Field, GameEvent, ObjectId, TickInput, Vector, tick},
};

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_TICKS: u64 = 3600;

#[cfg(not(target_arch = "wasm32"))]
struct Options {
    settings_path: Option<String>,
    practice: bool,
    ticks: u64,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args(args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut options = Options {
        settings_path: None,
        practice: false,
        ticks: DEFAULT_TICKS,
    };
    let mut args = args.peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--practice" => options.practice = true,
            "--ticks" => {
                let value = args.next().ok_or("--ticks needs a value")?;
                options.ticks = value
                    .parse()
                    .map_err(|e| format!("invalid tick count {value:?}: {e}"))?;
            }
            _ if arg.starts_with("--") => return Err(format!("unknown option {arg}")),
            _ => options.settings_path = Some(arg),
        }
    }
    Ok(options)
}

/// Steer every mallet toward the puck, each staying in its own half
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(field: &Field) -> TickInput {
    let Some(puck) = field.puck_id().and_then(|id| field.object(id)) else {
        return TickInput::default();
    };
    let half = field.settings.field_width / 2.0;
    let target = puck.position();

    let commands = field
        .mallet_ids()
        .into_iter()
        .filter_map(|id: ObjectId| {
            let mallet = field.object(id)?;
            let own_half = mallet.position().x() < half;
            let puck_in_half = (target.x() < half) == own_half;
            let direction = if puck_in_half {
                (target - mallet.position()).scale_to(1.0)
            } else {
                Vector::ZERO
            };
            Some(Command::Accelerate { id, direction })
        })
        .collect();
    TickInput { commands }
}

#[cfg(not(target_arch = "wasm32"))]
fn run(options: &Options) -> Result<(), EngineError> {
    let settings = match &options.settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    log::info!(
        "Seed {}, {} Hz ({:?} per tick), first to {}",
        settings.seed,
        settings.tick_hz,
        settings.tick_period(),
        settings.max_score
    );

    let mut field = if options.practice {
        Field::practice(settings)?
    } else {
        Field::standard(settings)?
    };

    let mut collisions = 0u64;
    for _ in 0..options.ticks {
        let input = scripted_input(&field);
        for event in tick(&mut field, &input) {
            match event {
                GameEvent::Collision { .. } => collisions += 1,
                GameEvent::Goal { scorer } => log::info!(
                    "[{}] goal {} ({}:{})",
                    field.time_ticks,
                    scorer.as_str(),
                    field.scoreboard.left,
                    field.scoreboard.right
                ),
                GameEvent::MatchWon { winner } => {
                    log::info!("[{}] match won by {}", field.time_ticks, winner.as_str())
                }
                GameEvent::RoundReset { round, .. } => {
                    log::debug!("[{}] round {round}", field.time_ticks)
                }
            }
        }
    }

    let board = &field.scoreboard;
    log::info!(
        "Finished after {} ticks: {} collisions, score {}:{}, matches {}:{}",
        field.time_ticks,
        collisions,
        board.left,
        board.right,
        board.matches_won(Side::Left),
        board.matches_won(Side::Right)
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Air Hockey (headless) starting...");

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            eprintln!("usage: air-hockey [SETTINGS.json] [--practice] [--ticks N]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless driver is native only
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(args(&["cfg.json", "--practice", "--ticks", "10"])).unwrap();
        assert_eq!(options.settings_path.as_deref(), Some("cfg.json"));
        assert!(options.practice);
        assert_eq!(options.ticks, 10);

        let defaults = parse_args(args(&[])).unwrap();
        assert_eq!(defaults.ticks, DEFAULT_TICKS);
        assert!(!defaults.practice);

        assert!(parse_args(args(&["--ticks"])).is_err());
        assert!(parse_args(args(&["--ticks", "many"])).is_err());
        assert!(parse_args(args(&["--fast"])).is_err());
    }

    #[test]
    fn test_scripted_input_moves_only_the_mallet_in_the_puck_half() {
        let field = Field::standard(Settings::default()).unwrap();
        let input = scripted_input(&field);
        assert_eq!(input.commands.len(), 2);
        let directions: Vec<Vector> = input
            .commands
            .iter()
            .map(|c| match *c {
                Command::Accelerate { direction, .. } => direction,
                Command::Steer { acceleration, .. } => acceleration,
            })
            .collect();
        // Puck starts in the left half
        assert!((directions[0].modulus() - 1.0).abs() < 1e-4);
        assert_eq!(directions[1], Vector::ZERO);
    }

    #[test]
    fn test_short_run_completes() {
        let options = Options {
            settings_path: None,
            practice: true,
            ticks: 50,
        };
        assert!(run(&options).is_ok());
    }
}
