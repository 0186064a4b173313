use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::events::{dispatch_all, GameEvent, GameListener};
use crate::picker::TargetPicker;
use crate::scheduler::RoundScheduler;
use crate::score::{Outcome, SessionStats, SessionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Game,
    Results,
}

/// Terminal host: owns the scheduler and keeps the view state the
/// renderer reads. Mirrors the home / game / results panels.
#[derive(Debug)]
pub struct App<P: TargetPicker> {
    pub scheduler: RoundScheduler<P>,
    pub screen: Screen,
    pub last_outcome: Option<Outcome>,
    pub hud: SessionStats,
    pub results: Option<SessionSummary>,
    pub error: Option<String>,
    pub should_quit: bool,
}

impl<P: TargetPicker> App<P> {
    pub fn new(scheduler: RoundScheduler<P>) -> Self {
        Self {
            scheduler,
            screen: Screen::Home,
            last_outcome: None,
            hud: SessionStats::default(),
            results: None,
            error: None,
            should_quit: false,
        }
    }

    pub fn play(&mut self) {
        match self.scheduler.start() {
            Ok(events) => {
                self.screen = Screen::Game;
                self.last_outcome = None;
                self.hud = SessionStats::default();
                self.results = None;
                self.error = None;
                self.apply(events);
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.screen = Screen::Home;
            }
        }
    }

    pub fn stop(&mut self) {
        let events = self.scheduler.stop();
        self.apply(events);
    }

    pub fn on_tick(&mut self, delta: Duration) {
        let events = self.scheduler.tick(delta);
        self.apply(events);
    }

    pub fn pick(&mut self, index: usize) {
        let events = self.scheduler.select(index);
        self.apply(events);
    }

    pub fn quit(&mut self) {
        self.stop();
        self.should_quit = true;
    }

    /// Applies one key press to whichever screen is showing
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        match (self.screen, key.code) {
            (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => self.quit(),
            (Screen::Home, KeyCode::Char('p')) | (Screen::Home, KeyCode::Enter) => self.play(),
            (Screen::Game, KeyCode::Char('s')) => self.stop(),
            (Screen::Game, KeyCode::Char(c)) => {
                if let Some(index) = target_for_key(c) {
                    self.pick(index);
                }
            }
            (Screen::Results, KeyCode::Char('p'))
            | (Screen::Results, KeyCode::Char('r'))
            | (Screen::Results, KeyCode::Enter) => self.play(),
            (Screen::Results, KeyCode::Char('h')) => self.screen = Screen::Home,
            _ => {}
        }
    }

    fn apply(&mut self, events: Vec<GameEvent>) {
        dispatch_all(&events, self);
    }
}

impl<P: TargetPicker> GameListener for App<P> {
    fn on_round_armed(&mut self, _target: usize) {
        self.last_outcome = None;
    }

    fn on_round_resolved(&mut self, outcome: Outcome, stats: &SessionStats) {
        self.last_outcome = Some(outcome);
        self.hud = stats.clone();
    }

    fn on_session_ended(&mut self, summary: &SessionSummary) {
        self.results = Some(summary.clone());
        self.screen = Screen::Results;
    }
}

/// `'1'` selects target 0, up to `'9'`
pub fn target_for_key(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d) if d >= 1 => Some(d as usize - 1),
        _ => None,
    }
}
