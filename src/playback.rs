use crate::{GameState, engine::TickEngine};
use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, RecvTimeoutError},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(25);
const PAUSED_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shared handle to a game driven by a [`Player`]
pub type SharedGame<E> = Arc<Mutex<GameState<E>>>;

/// Background loop ticking a shared game at a fixed interval
///
/// Pausing keeps the worker alive and only skips ticks, stopping ends the
/// worker. Dropping the player without calling [`Player::stop`] also ends the
/// worker at its next wake-up.
#[derive(Debug)]
pub struct Player {
    paused: Arc<AtomicBool>,
    stop: mpsc::Sender<()>,
    thread: JoinHandle<u64>,
}

impl Player {
    pub fn spawn<E>(game: SharedGame<E>, interval: Duration) -> Self
    where
        E: TickEngine + Send + 'static,
    {
        Self::start(game, interval, None)
    }

    /// Like [`Player::spawn`], but the worker ends on its own after `ticks` ticks
    pub fn spawn_limited<E>(game: SharedGame<E>, interval: Duration, ticks: u64) -> Self
    where
        E: TickEngine + Send + 'static,
    {
        Self::start(game, interval, Some(ticks))
    }

    fn start<E>(game: SharedGame<E>, interval: Duration, limit: Option<u64>) -> Self
    where
        E: TickEngine + Send + 'static,
    {
        let paused = Arc::new(AtomicBool::new(false));
        let (stop, stop_rx) = mpsc::channel();

        let worker_paused = Arc::clone(&paused);
        let thread =
            thread::spawn(move || play_loop(game, interval, limit, worker_paused, stop_rx));
        log::debug!("playback started, interval {:?}", interval);

        Self {
            paused,
            stop,
            thread,
        }
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::Release);
    }
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
    }
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }
    /// Whether the worker has ended, by reaching its tick limit or otherwise
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Ends the loop and returns how many ticks it performed
    pub fn stop(self) -> thread::Result<u64> {
        // the worker may already be gone if the game mutex was poisoned
        let _ = self.stop.send(());
        let ticks = self.thread.join()?;
        log::debug!("playback stopped after {} ticks", ticks);
        Ok(ticks)
    }
}

fn play_loop<E: TickEngine>(
    game: SharedGame<E>,
    interval: Duration,
    limit: Option<u64>,
    paused: Arc<AtomicBool>,
    stop: mpsc::Receiver<()>,
) -> u64 {
    let mut ticks = 0;
    loop {
        if limit.is_some_and(|limit| ticks >= limit) {
            break;
        }
        let wait = if paused.load(Ordering::Acquire) {
            PAUSED_POLL_INTERVAL
        } else {
            match game.lock() {
                Ok(mut game) => game.tick(),
                Err(_) => {
                    log::warn!("game state poisoned, stopping playback");
                    break;
                }
            }
            ticks += 1;
            interval
        };

        match stop.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => continue,
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    ticks
}
