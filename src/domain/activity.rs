use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(DomainError::invalid(format!("unknown log level '{}'", other))),
        }
    }
}

impl From<LogLevel> for log::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Info => log::Level::Info,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Error => log::Level::Error,
        }
    }
}

/// Something worth remembering that happened in a service.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEvent {
    pub level: LogLevel,
    pub source: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub metadata: Value,
}

impl ActivityEvent {
    pub fn new(level: LogLevel, source: &str, action: &str) -> Self {
        Self {
            level,
            source: source.to_string(),
            action: action.to_string(),
            entity: None,
            entity_id: None,
            metadata: Value::Object(Default::default()),
        }
    }

    pub fn info(source: &str, action: &str) -> Self {
        Self::new(LogLevel::Info, source, action)
    }

    pub fn warn(source: &str, action: &str) -> Self {
        Self::new(LogLevel::Warn, source, action)
    }

    pub fn on(mut self, entity: &str, id: impl fmt::Display) -> Self {
        self.entity = Some(entity.to_string());
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A persisted, immutable log row.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub id: Uuid,
    pub level: LogLevel,
    pub source: String,
    pub action: String,
    pub entity: Option<String>,
    pub entity_id: Option<String>,
    pub metadata: Value,
    pub environment: String,
    pub application: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub level: Option<LogLevel>,
    pub source: Option<String>,
}

/// Sink for activity events. Recording never fails the caller.
pub trait ActivityLogger: Send + Sync + 'static {
    fn record(&self, event: ActivityEvent);
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn builder_fills_entity_and_metadata() {
        let id = Uuid::new_v4();
        let event = ActivityEvent::info("order_service", "order.created")
            .on("order", id)
            .with_metadata(json!({ "lines": 2 }));

        assert_eq!(event.level, LogLevel::Info);
        assert_eq!(event.entity.as_deref(), Some("order"));
        assert_eq!(event.entity_id, Some(id.to_string()));
        assert_eq!(event.metadata["lines"], 2);
    }

    #[test]
    fn warning_alias_parses() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    }
}
