use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget, Wrap},
};

use crate::app::{App, Screen};
use crate::picker::TargetPicker;
use crate::scheduler::RoundPhase;
use crate::score::{format_reaction, Outcome};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const TARGET_HEIGHT: u16 = 5;

impl<P: TargetPicker> Widget for &App<P> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.inner(Margin {
            horizontal: HORIZONTAL_MARGIN,
            vertical: VERTICAL_MARGIN,
        });

        match self.screen {
            Screen::Home => render_home(self, area, buf),
            Screen::Game => render_game(self, area, buf),
            Screen::Results => render_results(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn render_home<P: TargetPicker>(app: &App<P>, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled("redpick", bold().fg(Color::Red))),
        Line::from(""),
        Line::from("Hit the red target before it disappears."),
        Line::from(""),
        Line::from(Span::styled("(p)lay / (q)uit", dim())),
    ];
    if let Some(err) = &app.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(err.clone(), bold().fg(Color::Red))));
    }

    let height = lines.len() as u16;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(centered(area, height), buf);
}

fn render_game<P: TargetPicker>(app: &App<P>, area: Rect, buf: &mut Buffer) {
    let [hud, _, board, feedback, _, hints] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(TARGET_HEIGHT),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let summary = app.scheduler.engine().summarize(&app.hud);
    let mut hud_spans = vec![
        Span::styled(format!("Score: {}", summary.score), bold()),
        Span::raw("   "),
        Span::raw(format!("Accuracy: {:.0}%", summary.accuracy_pct)),
        Span::raw("   "),
        Span::raw(format!("Best: {}", format_reaction(summary.best_reaction))),
    ];
    if let Some(left) = app.scheduler.time_left() {
        hud_spans.push(Span::raw("   "));
        hud_spans.push(Span::styled(
            format!("{:.2}s", left.as_secs_f64()),
            Style::default().fg(Color::Yellow),
        ));
    }
    Paragraph::new(Line::from(hud_spans))
        .alignment(Alignment::Center)
        .render(hud, buf);

    render_targets(app, board, buf);

    if let Some(outcome) = app.last_outcome {
        let engine = app.scheduler.engine();
        let text = match outcome {
            Outcome::Correct(r) => {
                format!("Hit! {:.2}s (+{})", r.as_secs_f64(), engine.points_for(r))
            }
            Outcome::Wrong => format!("Wrong target (-{})", engine.rules().wrong_penalty),
            Outcome::Timeout => format!("Too slow (-{})", engine.rules().timeout_penalty),
        };
        let color = if outcome.is_correct() {
            Color::Green
        } else {
            Color::Red
        };
        Paragraph::new(Span::styled(text, bold().fg(color)))
            .alignment(Alignment::Center)
            .render(feedback, buf);
    }

    let count = app.scheduler.targets().len();
    Paragraph::new(Span::styled(
        format!("(1-{count}) pick / (s)top / (q)uit"),
        dim(),
    ))
    .alignment(Alignment::Center)
    .render(hints, buf);
}

fn render_targets<P: TargetPicker>(app: &App<P>, area: Rect, buf: &mut Buffer) {
    let targets = app.scheduler.targets();
    if targets.is_empty() {
        return;
    }

    let armed = app.scheduler.phase() == RoundPhase::Armed;
    let cells = Layout::horizontal(vec![Constraint::Fill(1); targets.len()]).split(area);

    for (target, cell) in targets.iter().zip(cells.iter()) {
        let color = match (armed, target.is_active) {
            (true, true) => Color::Red,
            (true, false) => Color::Green,
            (false, _) => Color::DarkGray,
        };
        Paragraph::new(Line::from(Span::styled(
            format!("{}", target.index + 1),
            bold().fg(Color::Black),
        )))
        .alignment(Alignment::Center)
        .block(Block::bordered())
        .style(Style::default().bg(color))
        .render(
            cell.inner(Margin {
                horizontal: 1,
                vertical: 0,
            }),
            buf,
        );
    }
}

fn render_results<P: TargetPicker>(app: &App<P>, area: Rect, buf: &mut Buffer) {
    let mut lines = vec![
        Line::from(Span::styled("Results", bold().add_modifier(Modifier::UNDERLINED))),
        Line::from(""),
    ];
    if let Some(summary) = &app.results {
        lines.extend(summary.to_string().lines().map(|l| Line::from(l.to_string())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(p)lay again / (h)ome / (q)uit",
        dim(),
    )));

    let height = lines.len() as u16;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(centered(area, height), buf);
}

fn centered(area: Rect, height: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    middle
}
