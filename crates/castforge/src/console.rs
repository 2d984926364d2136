//! Colorful console output for casting sessions.
//!
//! Provides a custom `tracing` layer that formats castforge events with
//! colors. Enabled by the `console` feature.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect. Honours
/// `RUST_LOG`, showing castforge events at `info` by default.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let mut filter = EnvFilter::from_default_env();
        for directive in ["castforge=info", "castforge_engine=info"] {
            if let Ok(directive) = directive.parse() {
                filter = filter.add_directive(directive);
            }
        }

        // Another global subscriber may already be installed.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(CastingConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let version_line = format!(
        "CastForge v{} - casting allocation and alternative cast balancing",
        env!("CARGO_PKG_VERSION")
    );
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", version_line.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats castforge events with colors.
pub struct CastingConsoleLayer;

impl<S: Subscriber> Layer<S> for CastingConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("castforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    step: Option<String>,
    engine: Option<String>,
    applicants: Option<u64>,
    accepted: Option<u64>,
    rejected: Option<u64>,
    assigned: Option<u64>,
    attempts: Option<u64>,
    fell_back: Option<bool>,
    duration_ms: Option<u64>,
    chunk_size: Option<u64>,
    variables: Option<u64>,
    clauses: Option<u64>,
    solved: Option<bool>,
    nodes: Option<u64>,
    roles: Option<u64>,
    batches: Option<u64>,
    placements: Option<u64>,
    unfilled: Option<u64>,
    numbered: Option<u64>,
    applied: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "step" => self.step = Some(s),
            "engine" => self.engine = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "step" => self.step = Some(value.to_string()),
            "engine" => self.engine = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "fell_back" => self.fell_back = Some(value),
            "solved" => self.solved = Some(value),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "applicants" => &mut self.applicants,
            "accepted" => &mut self.accepted,
            "rejected" => &mut self.rejected,
            "assigned" => &mut self.assigned,
            "attempts" => &mut self.attempts,
            "duration_ms" => &mut self.duration_ms,
            "chunk_size" => &mut self.chunk_size,
            "variables" => &mut self.variables,
            "clauses" => &mut self.clauses,
            "nodes" => &mut self.nodes,
            "roles" => &mut self.roles,
            "batches" => &mut self.batches,
            "placements" => &mut self.placements,
            "unfilled" => &mut self.unfilled,
            "numbered" => &mut self.numbered,
            "applied" => &mut self.applied,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "selection_start" => format_selection_start(v),
        "selection_end" => format_selection_end(v),
        "chunk_attempt" => format_chunk_attempt(v),
        "balance_fallback" => format_fallback(v),
        "cast_numbers_allocated" => line(
            "[Numbers]",
            format!("{} cast numbers allocated", count(v.numbered)),
        ),
        "tags_applied" => line("[Tags]", format!("{} tags applied", count(v.applied))),
        "casting_start" => line(
            "[Casting]",
            format!(
                "{} casting started: applicants ({}), roles ({})",
                v.engine.as_deref().unwrap_or("Unknown").white().bold(),
                count(v.applicants),
                count(v.roles)
            ),
        ),
        "casting_end" => format_casting_end(v),
        _ => String::new(),
    }
}

fn format_selection_start(v: &EventVisitor) -> String {
    let step = v.step.as_deref().unwrap_or("selection");
    line(
        &format!("[{}]", step),
        format!("{} started, applicants ({})", step.white().bold(), count(v.applicants)),
    )
}

fn format_selection_end(v: &EventVisitor) -> String {
    let step = v.step.as_deref().unwrap_or("selection");
    let mut details = Vec::new();
    if let Some(accepted) = v.accepted {
        details.push(format!("accepted ({})", fmt_count(accepted)));
    }
    if let Some(rejected) = v.rejected {
        details.push(format!("rejected ({})", fmt_count(rejected)));
    }
    if let Some(assigned) = v.assigned {
        details.push(format!("assigned ({})", fmt_count(assigned)));
    }
    if let Some(attempts) = v.attempts {
        details.push(format!("attempts ({})", fmt_count(attempts)));
    }
    if v.fell_back == Some(true) {
        details.push("fell back to even fill".bright_red().to_string());
    }
    details.push(format!(
        "time spent ({})",
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
    ));
    line(
        &format!("[{}]", step),
        format!("{} ended: {}", step.white().bold(), details.join(", ")),
    )
}

fn format_chunk_attempt(v: &EventVisitor) -> String {
    let verdict = if v.solved == Some(true) {
        "solved".bright_green().to_string()
    } else {
        "unsolvable".yellow().to_string()
    };
    format!(
        "    {} Chunk {:>4} | {} variables, {} clauses, {} nodes | {}",
        "->".bright_blue(),
        count(v.chunk_size),
        count(v.variables),
        count(v.clauses),
        count(v.nodes),
        verdict
    )
}

fn format_fallback(v: &EventVisitor) -> String {
    format!(
        "{} {} {} no chunk size solved after {} attempts, filling casts evenly",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Balance]".bright_cyan(),
        count(v.attempts)
    )
}

fn format_casting_end(v: &EventVisitor) -> String {
    let unfilled = v.unfilled.unwrap_or(0);
    let unfilled = if unfilled == 0 {
        "0".bright_green().to_string()
    } else {
        fmt_count(unfilled).bright_red().to_string()
    };
    line(
        "[Casting]",
        format!(
            "Casting ended: batches ({}), placements ({}), unfilled roles ({}), time spent ({})",
            count(v.batches),
            count(v.placements),
            unfilled,
            format_duration_ms(v.duration_ms.unwrap_or(0)).yellow()
        ),
    )
}

fn line(tag: &str, body: String) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        tag.bright_cyan(),
        body
    )
}

fn count(value: Option<u64>) -> String {
    fmt_count(value.unwrap_or(0)).bright_yellow().to_string()
}

fn fmt_count(value: u64) -> String {
    value.to_formatted_string(&Locale::en)
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_scale_units() {
        assert_eq!(format_duration_ms(250), "250ms");
        assert_eq!(format_duration_ms(1500), "1.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_print_nothing() {
        let visitor = EventVisitor {
            event: Some("role_cast".to_string()),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).is_empty());
    }

    #[test]
    fn test_chunk_attempts_report_verdict() {
        let visitor = EventVisitor {
            event: Some("chunk_attempt".to_string()),
            chunk_size: Some(2),
            solved: Some(true),
            ..EventVisitor::default()
        };
        assert!(format_event(&visitor).contains("solved"));
    }
}
