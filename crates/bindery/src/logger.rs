use std::time::{Duration, Instant};

use log::LevelFilter;
use tracing::Level;

use crate::command::{Command, CommandKind};

/// Logging configuration for commands.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct LogSettings {
    /// Log level for statements.
    pub statements_level: LevelFilter,
    /// Log level for slow statements.
    pub slow_statements_level: LevelFilter,
    /// Threshold for slow statements.
    pub slow_statements_duration: Duration,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            statements_level: LevelFilter::Debug,
            slow_statements_level: LevelFilter::Warn,
            slow_statements_duration: Duration::from_secs(1),
        }
    }
}

impl LogSettings {
    pub fn log_statements(&mut self, level: LevelFilter) {
        self.statements_level = level;
    }

    pub fn log_slow_statements(&mut self, level: LevelFilter, duration: Duration) {
        self.slow_statements_level = level;
        self.slow_statements_duration = duration;
    }

    /// Returns `true` if any logging level is enabled.
    pub fn is_enabled(&self) -> bool {
        self.statements_level != LevelFilter::Off || self.slow_statements_level != LevelFilter::Off
    }
}

fn to_levels(filter: LevelFilter) -> Option<(Level, log::Level)> {
    let tracing_level = match filter {
        LevelFilter::Error => Some(Level::ERROR),
        LevelFilter::Warn => Some(Level::WARN),
        LevelFilter::Info => Some(Level::INFO),
        LevelFilter::Debug => Some(Level::DEBUG),
        LevelFilter::Trace => Some(Level::TRACE),
        LevelFilter::Off => None,
    };
    tracing_level.zip(filter.to_level())
}

// `tracing` needs the level as a constant at each call site.
macro_rules! for_level {
    ($level:expr, $m:ident ! ( $($args:tt)* )) => {
        match $level {
            Level::ERROR => $m!(Level::ERROR, $($args)*),
            Level::WARN => $m!(Level::WARN, $($args)*),
            Level::INFO => $m!(Level::INFO, $($args)*),
            Level::DEBUG => $m!(Level::DEBUG, $($args)*),
            Level::TRACE => $m!(Level::TRACE, $($args)*),
        }
    };
}

macro_rules! enabled {
    ($level:expr,) => {
        tracing::enabled!(target: "command", $level)
    };
}

macro_rules! command_event {
    ($level:expr, $summary:expr, $sql:expr, $kind:expr, $parameters:expr, $affected:expr, $returned:expr, $elapsed:expr) => {
        tracing::event!(
            target: "command",
            $level,
            summary = $summary,
            db.statement = $sql,
            kind = $kind,
            parameters = $parameters,
            rows_affected = $affected,
            rows_returned = $returned,
            elapsed = ?$elapsed,
        )
    };
}

/// Tracks one command execution and logs it when dropped.
pub struct CommandLogger<'c> {
    command: &'c Command,
    rows_returned: u64,
    rows_affected: u64,
    start: Instant,
    settings: LogSettings,
}

impl<'c> CommandLogger<'c> {
    pub fn new(command: &'c Command, settings: LogSettings) -> Self {
        Self {
            command,
            rows_returned: 0,
            rows_affected: 0,
            start: Instant::now(),
            settings,
        }
    }

    pub fn increase_rows_returned(&mut self, n: u64) {
        self.rows_returned += n;
    }

    pub fn increase_rows_affected(&mut self, n: u64) {
        self.rows_affected += n;
    }

    /// Emit a log event for the completed command.
    pub fn finish(&self) {
        let elapsed = self.start.elapsed();
        let filter = if elapsed >= self.settings.slow_statements_duration {
            self.settings.slow_statements_level
        } else {
            self.settings.statements_level
        };
        let Some((tracing_level, log_level)) = to_levels(filter) else {
            return;
        };

        // The level may be enabled from either the log or the tracing side.
        if !log::log_enabled!(target: "command", log_level) && !for_level!(tracing_level, enabled!())
        {
            return;
        }

        let (summary, sql) = self.payload();
        let kind = match self.command.kind() {
            CommandKind::Text => "text",
            CommandKind::StoredProcedure => "procedure",
        };
        for_level!(
            tracing_level,
            command_event!(
                summary.as_str(),
                sql.as_str(),
                kind,
                self.command.parameters().len(),
                self.rows_affected,
                self.rows_returned,
                elapsed
            )
        );
    }

    fn payload(&self) -> (String, String) {
        let text = self.command.sql();
        let mut summary = summarize(text);
        if summary != text {
            summary.push_str(" …");
            let formatted = sqlformat::format(
                text,
                &sqlformat::QueryParams::None,
                &sqlformat::FormatOptions::default(),
            );
            (summary, format!("\n\n{formatted}\n"))
        } else {
            (summary, String::new())
        }
    }
}

impl Drop for CommandLogger<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

/// The first four words of a command.
fn summarize(sql: &str) -> String {
    sql.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
}
