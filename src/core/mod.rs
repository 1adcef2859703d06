pub mod board;
pub mod connection;
pub mod seats;
pub mod session;

pub use board::Board;
pub use connection::{Connection, ConnectionId};
pub use seats::{Seat, SeatAssignment, SeatMap};
pub use session::{GameSession, MoveOutcome};
