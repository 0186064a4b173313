use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, LevelFilter};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use redpick::{
    app::App,
    config::{Config, ConfigStore, FileConfigStore},
    picker::RandomPicker,
    runtime::{CrosstermEventSource, HostEvent, Runner, WallTicker},
    scheduler::{GameSettings, RoundScheduler},
    TargetPicker,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};

/// hit the red target before the reaction window closes
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A reaction-time minigame: one of several targets turns red each round. Pick it with its number key before time runs out. Faster hits score more; misses and timeouts cost points."
)]
pub struct Cli {
    /// number of targets per round
    #[clap(short = 't', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    targets: Option<u8>,

    /// seconds allowed to react before a round times out
    #[clap(short = 'w', long)]
    window: Option<f64>,

    /// seconds between rounds
    #[clap(short = 'g', long)]
    gap: Option<f64>,

    /// milliseconds between frame ticks
    #[clap(long)]
    tick_rate: Option<u64>,

    /// seed for a reproducible target sequence
    #[clap(long)]
    seed: Option<u64>,

    /// config file to read (and write with --save)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// persist the given options as the new defaults
    #[clap(long)]
    save: bool,
}

impl Cli {
    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Command line values win over the stored config
    fn merge(&self, mut cfg: Config) -> Config {
        if let Some(t) = self.targets {
            cfg.target_count = t as usize;
        }
        if let Some(w) = self.window {
            cfg.max_reaction_secs = w;
        }
        if let Some(g) = self.gap {
            cfg.round_gap_secs = g;
        }
        if let Some(ms) = self.tick_rate {
            cfg.tick_rate_ms = ms;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // stderr shares the terminal with the TUI, so stay quiet unless RUST_LOG asks otherwise
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let store = cli.store();
    let cfg = cli.merge(store.load());

    let settings = match GameSettings::try_from(&cfg) {
        Ok(settings) => settings,
        Err(e) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, e.to_string()).exit();
        }
    };

    if cli.save {
        store.save(&cfg)?;
        info!("saved config to {}", store.path().display());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let picker = match cfg.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    };
    let mut app = App::new(RoundScheduler::new(settings, picker));
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        WallTicker::new(cfg.tick_interval()),
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui(&mut terminal, &mut app, &mut runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(summary) = &app.results {
        info!("last session:\n{summary}");
    }

    result
}

fn run_tui<B: Backend, P: TargetPicker>(
    terminal: &mut Terminal<B>,
    app: &mut App<P>,
    runner: &mut Runner<CrosstermEventSource, WallTicker>,
) -> Result<(), Box<dyn Error>> {
    while !app.should_quit {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        match runner.step() {
            HostEvent::Tick(delta) => app.on_tick(delta),
            HostEvent::Resize => {}
            // keys resolve against the state of the last tick
            HostEvent::Key(key) => app.handle_key(key),
        }
    }

    Ok(())
}
