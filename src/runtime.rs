use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the host loop reacts to. `Tick` carries the game time that passed
/// since the previous tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Key(KeyEvent),
    Resize,
    Tick(Duration),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait HostEventSource: Send + 'static {
    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread. Only key presses are
/// forwarded; releases and repeats would otherwise count as extra picks.
pub struct CrosstermEventSource {
    rx: Receiver<HostEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => HostEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => HostEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HostEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed source for driving the loop without a terminal
pub struct TestEventSource {
    rx: Receiver<HostEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<HostEvent>) -> Self {
        Self { rx }
    }
}

impl HostEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<HostEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Decides when the next tick is due and how much game time it covers.
pub trait Ticker: Send + 'static {
    /// How long the runner may wait for input before ticking
    fn until_next(&self) -> Duration;
    /// Marks a tick and returns the time it covers
    fn lap(&mut self) -> Duration;
}

/// Measures real elapsed time between ticks, so a reaction is timed by the
/// wall clock even when rendering or input handling runs long.
#[derive(Clone, Copy, Debug)]
pub struct WallTicker {
    interval: Duration,
    last: Instant,
}

impl WallTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }
}

impl Ticker for WallTicker {
    fn until_next(&self) -> Duration {
        self.interval.saturating_sub(self.last.elapsed())
    }

    fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let delta = now.saturating_duration_since(self.last);
        self.last = now;
        delta
    }
}

/// Simulated time: every tick covers exactly one interval.
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn until_next(&self) -> Duration {
        self.interval
    }

    fn lap(&mut self) -> Duration {
        self.interval
    }
}

/// Interleaves input with ticks for the game loop
pub struct Runner<E: HostEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: HostEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Returns the next input event, or a `Tick` once the ticker is due.
    /// A due tick wins over queued input so a stream of key presses cannot
    /// hold back the reaction timeout.
    pub fn step(&mut self) -> HostEvent {
        let wait = self.ticker.until_next();
        if !wait.is_zero() {
            if let Ok(ev) = self.event_source.recv_timeout(wait) {
                return ev;
            }
        }
        HostEvent::Tick(self.ticker.lap())
    }
}
