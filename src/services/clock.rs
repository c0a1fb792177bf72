use chrono::{DateTime, NaiveDate, Utc};

/// Source of "now" for handlers. Registered as app data so tests can pin it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(instant) => *instant,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// A clock frozen at midnight UTC of `date`.
    pub fn fixed_on(date: NaiveDate) -> Self {
        Clock::Fixed(date.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}
