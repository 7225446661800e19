use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Once-per-day latch checked on every scheduler wake.
///
/// Fires on the first wake at or after `fire_at` on a date it has not fired
/// on yet. Wake granularity bounds how late past `fire_at` that is.
#[derive(Debug, Clone)]
pub struct DailyTrigger {
    fire_at: NaiveTime,
    last_fired: Option<NaiveDate>,
}

impl DailyTrigger {
    /// If `started_at` is already past today's `fire_at`, today counts as
    /// handled so a late start does not send a late reminder.
    #[must_use]
    pub fn new(fire_at: NaiveTime, started_at: NaiveDateTime) -> Self {
        let last_fired = (started_at.time() >= fire_at).then(|| started_at.date());
        Self {
            fire_at,
            last_fired,
        }
    }

    /// Returns `true` exactly once per date, on the first call at or after
    /// `fire_at`, and records the firing.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        let today = now.date();
        if now.time() < self.fire_at || self.last_fired == Some(today) {
            return false;
        }
        self.last_fired = Some(today);
        true
    }

    /// The next instant this trigger would fire, as seen from `now`.
    #[must_use]
    pub fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let date = if self.last_fired == Some(today) || now.time() >= self.fire_at {
            today.checked_add_days(Days::new(1)).unwrap_or(today)
        } else {
            today
        };
        date.and_time(self.fire_at)
    }
}
