use serde::{Deserialize, Serialize};

use super::ConnectionId;

/// One of the two playing positions.
///
/// Seats are claimed in order: the first connection to arrive takes
/// [`Seat::First`] and plays White, the next takes [`Seat::Second`] and
/// plays Black. Everyone else watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    /// The chess color this seat plays.
    pub fn color(self) -> chess::Color {
        match self {
            Seat::First => chess::Color::White,
            Seat::Second => chess::Color::Black,
        }
    }

    pub fn from_color(color: chess::Color) -> Self {
        match color {
            chess::Color::White => Seat::First,
            chess::Color::Black => Seat::Second,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seat::First => "first",
            Seat::Second => "second",
        }
    }
}

/// What a new connection was assigned on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAssignment {
    Player(Seat),
    Spectator,
}

/// The two seat slots and who holds them.
///
/// A connection id appears in at most one slot. Roles are never stored
/// anywhere else; [`SeatMap::seat_of`] is the single source of truth.
#[derive(Debug, Default)]
pub struct SeatMap {
    first: Option<ConnectionId>,
    second: Option<ConnectionId>,
}

impl SeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `id` to the first open seat, or make it a spectator.
    ///
    /// This cannot fail: a full board simply yields
    /// [`SeatAssignment::Spectator`] with no binding created.
    pub fn claim(&mut self, id: ConnectionId) -> SeatAssignment {
        if self.first.is_none() {
            self.first = Some(id);
            SeatAssignment::Player(Seat::First)
        } else if self.second.is_none() {
            self.second = Some(id);
            SeatAssignment::Player(Seat::Second)
        } else {
            SeatAssignment::Spectator
        }
    }

    /// Clear whichever seat `id` holds, returning it.
    ///
    /// The freed seat is not reassigned here; the next connection to
    /// claim picks it up. Returns `None` for spectators.
    pub fn release(&mut self, id: ConnectionId) -> Option<Seat> {
        if self.first == Some(id) {
            self.first = None;
            Some(Seat::First)
        } else if self.second == Some(id) {
            self.second = None;
            Some(Seat::Second)
        } else {
            None
        }
    }

    /// The connection currently holding `seat`, if any.
    pub fn holder(&self, seat: Seat) -> Option<ConnectionId> {
        match seat {
            Seat::First => self.first,
            Seat::Second => self.second,
        }
    }

    /// The seat held by `id`, if any. Absence means spectator.
    pub fn seat_of(&self, id: ConnectionId) -> Option<Seat> {
        if self.first == Some(id) {
            Some(Seat::First)
        } else if self.second == Some(id) {
            Some(Seat::Second)
        } else {
            None
        }
    }

    pub fn occupied_count(&self) -> usize {
        self.first.iter().count() + self.second.iter().count()
    }
}
