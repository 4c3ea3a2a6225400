use crate::dates::parse_canonical;
use chrono::{Duration, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Jump(NaiveDate),
    Reload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub date: NaiveDate,
    generation: u64,
}

/// Owns the current date. Every date change issues a ticket; only the most
/// recent ticket may publish its result.
#[derive(Debug, Clone)]
pub struct Navigator {
    current: NaiveDate,
    generation: u64,
}

impl Navigator {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            current: today,
            generation: 0,
        }
    }

    pub fn current(&self) -> NaiveDate {
        self.current
    }

    pub fn apply(&mut self, navigation: Navigation) -> LoadTicket {
        self.current = match navigation {
            Navigation::Previous => self.current - Duration::days(1),
            Navigation::Next => self.current + Duration::days(1),
            Navigation::Jump(date) => date,
            Navigation::Reload => self.current,
        };
        self.generation = self.generation.wrapping_add(1);

        LoadTicket {
            date: self.current,
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation && ticket.date == self.current
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidJumpInput(pub String);

/// Parses the jump-to-date field. Empty input means "stay put".
pub fn parse_jump_input(value: &str) -> Result<Option<NaiveDate>, InvalidJumpInput> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse_canonical(value)
        .map(Some)
        .ok_or_else(|| InvalidJumpInput(value.to_string()))
}
