pub mod requests;
pub mod responses;

pub use requests::MoveRequest;
pub use responses::{PlayedMove, RejectReason, RoleValue, ServerMessage};
