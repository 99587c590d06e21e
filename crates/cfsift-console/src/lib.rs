//! Console output for cfsift filtering sessions.
//!
//! Provides a custom `tracing` layer that prints the structured events emitted
//! by the cfsift crates as plain lines on stdout.

use num_format::{Locale, ToFormattedString};
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_DIRECTIVES: &str = "cfsift=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. `RUST_LOG`
/// overrides the default `cfsift=info` filter, which matches every cfsift
/// crate. If another global
/// subscriber is already installed, it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SiftConsoleLayer)
            .try_init();
    });
}

/// A tracing layer that formats cfsift events.
pub struct SiftConsoleLayer;

impl<S: Subscriber> Layer<S> for SiftConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Only handle cfsift events
        if !metadata.target().starts_with("cfsift") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        if let Some(output) = format_event(*metadata.level(), &visitor) {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    rule: Option<String>,
    queries: Option<u64>,
    candidates_per_query: Option<u64>,
    candidates: Option<u64>,
    rules: Option<u64>,
    tolerance: Option<f64>,
    query: Option<u64>,
    candidate: Option<u64>,
    counterfactual: Option<u64>,
    feasible: Option<u64>,
    changes: Option<u64>,
    reasons: Option<u64>,
    min_retained: Option<u64>,
    excluded: Option<u64>,
    infeasible: Option<u64>,
    truncated: Option<u64>,
    duration_ms: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "message" => self.message = Some(s),
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "rule" => self.rule = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = Some(value.to_string()),
            "event" => self.event = Some(value.to_string()),
            "rule" => self.rule = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        let slot = match field.name() {
            "queries" => &mut self.queries,
            "candidates_per_query" => &mut self.candidates_per_query,
            "candidates" => &mut self.candidates,
            "rules" => &mut self.rules,
            "query" => &mut self.query,
            "candidate" => &mut self.candidate,
            "counterfactual" => &mut self.counterfactual,
            "feasible" => &mut self.feasible,
            "changes" => &mut self.changes,
            "reasons" => &mut self.reasons,
            "min_retained" => &mut self.min_retained,
            "excluded" => &mut self.excluded,
            "infeasible" => &mut self.infeasible,
            "truncated" => &mut self.truncated,
            "duration_ms" => &mut self.duration_ms,
            _ => return,
        };
        *slot = Some(value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "tolerance" {
            self.tolerance = Some(value);
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> Option<String> {
    let body = match v.event.as_deref() {
        Some("filter_start") => format_filter_start(v),
        Some("query_judged") => format_query_judged(v),
        Some("candidate_rejected") => format_candidate_rejected(v),
        Some("filter_end") => format_filter_end(v),
        Some("reason_rendered") => format_reason_rendered(v),
        Some("reasons_rendered") => format_reasons_rendered(v),
        _ => v.message.clone()?,
    };

    Some(format!("{} {:>5} {}", timestamp(), level.as_str(), body))
}

fn format_filter_start(v: &EventVisitor) -> String {
    format!(
        "[Filter] started: queries ({}), candidates per query ({}), rules ({}), tolerance ({})",
        count(v.queries),
        count(v.candidates_per_query),
        count(v.rules),
        v.tolerance.unwrap_or(0.0)
    )
}

fn format_query_judged(v: &EventVisitor) -> String {
    format!(
        "[Query {}] feasible {} of {}",
        v.query.unwrap_or(0),
        count(v.feasible),
        count(v.candidates)
    )
}

fn format_candidate_rejected(v: &EventVisitor) -> String {
    format!(
        "[Query {}] candidate {} rejected by rule {}",
        v.query.unwrap_or(0),
        v.candidate.unwrap_or(0),
        v.rule.as_deref().unwrap_or("?")
    )
}

fn format_filter_end(v: &EventVisitor) -> String {
    format!(
        "[Filter] ended: time spent ({}), retained per query ({}), excluded ({}), infeasible ({}), truncated ({})",
        format_duration_ms(v.duration_ms.unwrap_or(0)),
        count(v.min_retained),
        count(v.excluded),
        count(v.infeasible),
        count(v.truncated)
    )
}

fn format_reason_rendered(v: &EventVisitor) -> String {
    format!(
        "[Reason] query {} counterfactual {} ({} changes)",
        v.query.unwrap_or(0),
        v.counterfactual.unwrap_or(0),
        v.changes.unwrap_or(0)
    )
}

fn format_reasons_rendered(v: &EventVisitor) -> String {
    format!(
        "[Reason] rendered {} reasons for {} queries",
        count(v.reasons),
        count(v.queries)
    )
}

fn count(value: Option<u64>) -> String {
    value.unwrap_or(0).to_formatted_string(&Locale::en)
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
