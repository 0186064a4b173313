use std::fmt;
use std::time::Duration;

/// Resolved result of one armed round
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Outcome {
    Correct(Duration),
    Wrong,
    Timeout,
}

impl Outcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, Outcome::Correct(_))
    }
}

/// Cumulative statistics for one session.
///
/// `total_clicks == correct_clicks + wrong_clicks` holds after every
/// [`ScoreEngine::apply_outcome`]; timeouts count as wrong clicks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub total_score: u32,
    pub total_clicks: u32,
    pub correct_clicks: u32,
    pub wrong_clicks: u32,
    pub total_reaction_time: Duration,
    pub best_reaction: Option<Duration>,
}

/// Reaction latency to points table plus the miss penalties.
///
/// Buckets are checked in order with a strict `<`, so a reaction sitting
/// exactly on a boundary lands in the next, cheaper bucket.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoreRules {
    pub buckets: Vec<(Duration, u32)>,
    pub fallback_points: u32,
    pub wrong_penalty: u32,
    pub timeout_penalty: u32,
}

impl Default for ScoreRules {
    fn default() -> Self {
        Self {
            buckets: vec![
                (Duration::from_millis(500), 100),
                (Duration::from_millis(1000), 80),
                (Duration::from_millis(1500), 60),
                (Duration::from_millis(2000), 40),
            ],
            fallback_points: 20,
            wrong_penalty: 30,
            timeout_penalty: 20,
        }
    }
}

/// Read-only projection of [`SessionStats`] for display
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSummary {
    pub score: u32,
    pub correct: u32,
    pub wrong: u32,
    pub accuracy_pct: f64,
    pub avg_reaction: Duration,
    pub best_reaction: Option<Duration>,
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Correct: {}", self.correct)?;
        writeln!(f, "Wrong: {}", self.wrong)?;
        writeln!(f, "Accuracy: {:.0}%", self.accuracy_pct)?;
        writeln!(f, "Avg Reaction: {:.2}s", self.avg_reaction.as_secs_f64())?;
        write!(f, "Best Reaction: {}", format_reaction(self.best_reaction))
    }
}

/// Formats an optional reaction as seconds, or an em dash when absent
pub fn format_reaction(reaction: Option<Duration>) -> String {
    match reaction {
        Some(r) => format!("{:.2}s", r.as_secs_f64()),
        None => "—".to_string(),
    }
}

/// Pure scoring: owns the rule table, never the stats it updates.
#[derive(Clone, Debug, Default)]
pub struct ScoreEngine {
    rules: ScoreRules,
}

impl ScoreEngine {
    pub fn new(rules: ScoreRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ScoreRules {
        &self.rules
    }

    pub fn points_for(&self, reaction: Duration) -> u32 {
        self.rules
            .buckets
            .iter()
            .find(|(limit, _)| reaction < *limit)
            .map_or(self.rules.fallback_points, |(_, points)| *points)
    }

    pub fn apply_outcome(&self, outcome: Outcome, stats: &SessionStats) -> SessionStats {
        let mut next = stats.clone();
        next.total_clicks += 1;

        match outcome {
            Outcome::Correct(reaction) => {
                next.correct_clicks += 1;
                next.total_reaction_time += reaction;
                next.best_reaction = Some(match next.best_reaction {
                    Some(best) => best.min(reaction),
                    None => reaction,
                });
                next.total_score += self.points_for(reaction);
            }
            Outcome::Wrong => {
                next.wrong_clicks += 1;
                next.total_score = next.total_score.saturating_sub(self.rules.wrong_penalty);
            }
            Outcome::Timeout => {
                next.wrong_clicks += 1;
                next.total_score = next.total_score.saturating_sub(self.rules.timeout_penalty);
            }
        }

        next
    }

    pub fn summarize(&self, stats: &SessionStats) -> SessionSummary {
        let accuracy_pct =
            stats.correct_clicks as f64 / stats.total_clicks.max(1) as f64 * 100.0;
        let avg_reaction = if stats.correct_clicks > 0 {
            stats.total_reaction_time / stats.correct_clicks
        } else {
            Duration::ZERO
        };

        SessionSummary {
            score: stats.total_score,
            correct: stats.correct_clicks,
            wrong: stats.wrong_clicks,
            accuracy_pct,
            avg_reaction,
            best_reaction: stats.best_reaction,
        }
    }
}
