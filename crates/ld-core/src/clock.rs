//! Display timestamps for history and award records

/// Timestamp format used in records
pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Source of record timestamps
pub trait Clock: Send {
    fn now(&self) -> String;
}

/// Local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> String {
        chrono::Local::now().format(TIME_FORMAT).to_string()
    }
}

/// Always returns the same timestamp
#[derive(Debug, Clone)]
pub struct FixedClock(pub String);

impl FixedClock {
    pub fn new(time: impl Into<String>) -> Self {
        Self(time.into())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> String {
        self.0.clone()
    }
}
