use std::{
    fs, io,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

use anyhow::{Context, Result, anyhow};
use lifegrid::{
    GameState, PatternCodec, RunLengthEncoded, SparseEngine, SparseGrid, SwitchEngine,
    enc::read_rle, playback::Player,
};

mod options;
mod stats;

use stats::Recorder;

fn initial_pattern(args: &options::Args) -> Result<SparseGrid> {
    if let Some(file_name) = args.input_file() {
        let file =
            fs::File::open(&file_name).with_context(|| format!("open pattern {}", file_name))?;
        return read_rle(io::BufReader::new(file))
            .with_context(|| format!("import pattern {}", file_name));
    }

    let (grid_w, grid_h) = args.grid_size()?;
    Ok(args.fill_mode()?.create_alive(grid_w, grid_h))
}

/// Runs `generations` ticks back to back on this thread
fn run_direct(
    game: &mut GameState<SwitchEngine>,
    generations: u64,
    stats: &mut stats::SwitchRecorder,
) {
    for _ in 0..generations {
        if stats.has_report() {
            log::info!("{}", stats.report());
        }

        game.tick();
        stats.record(game.generation(), game.current());
    }
}

/// Lets a [`Player`] tick the game every `interval`, sampling it at the same pace
fn run_playback(
    game: GameState<SwitchEngine>,
    interval: Duration,
    generations: u64,
    stats: &mut stats::SwitchRecorder,
) -> Result<GameState<SwitchEngine>> {
    let mut last_seen = game.generation();
    let shared = Arc::new(Mutex::new(game));
    let player = Player::spawn_limited(Arc::clone(&shared), interval, generations);

    loop {
        let finished = player.is_finished();
        {
            let game = shared.lock().map_err(|_| anyhow!("game state poisoned"))?;
            if game.generation() != last_seen {
                last_seen = game.generation();
                stats.record(last_seen, game.current());
            }
        }
        if stats.has_report() {
            log::info!("{}", stats.report());
        }
        if finished {
            break;
        }
        thread::sleep(interval);
    }

    player
        .stop()
        .map_err(|_| anyhow!("playback thread panicked"))?;
    Arc::try_unwrap(shared)
        .map_err(|_| anyhow!("game still shared after playback"))?
        .into_inner()
        .map_err(|_| anyhow!("game state poisoned"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = options::Args::from_env()? else {
        return Ok(());
    };

    let initial = initial_pattern(&args)?;
    log::info!("alive: {}", initial.len());

    // the engine is fixed for the whole run
    let engine = if args.serial() {
        SwitchEngine::Sparse(SparseEngine)
    } else {
        SwitchEngine::probe()
    };
    log::info!("engine: {}", engine.name());

    let mut game = GameState::with_engine(initial, engine);
    let sleep = args.sleep()?;
    let stats_file = args.stats_file();
    let mut stats =
        stats::SwitchRecorder::new(game.generation(), game.current(), stats_file.is_some());

    let generations = args.generations()?;
    match sleep {
        Some(interval) => game = run_playback(game, interval, generations, &mut stats)?,
        None => run_direct(&mut game, generations, &mut stats),
    }
    log::info!(
        "finished at generation {} with {} alive cells",
        game.generation(),
        game.current().len()
    );

    if let Some(file_name) = stats_file {
        stats
            .save(&file_name)
            .with_context(|| format!("write stats {}", file_name))?;
    }

    if let Some(file_name) = args.output_file() {
        let mut encoder = RunLengthEncoded::default();
        if let Some(name) = args.name() {
            encoder = encoder.set_name(name);
        }
        fs::write(&file_name, encoder.encode(game.current()))
            .with_context(|| format!("write pattern {}", file_name))?;
        log::info!("wrote {}", file_name);
    }

    Ok(())
}
