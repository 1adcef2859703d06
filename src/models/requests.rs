use serde::{Deserialize, Serialize};

fn default_promotion() -> String {
    "queen".to_string()
}

/// A proposed move as submitted by a client.
///
/// Squares are algebraic (file letter a-h, rank digit 1-8). The
/// promotion piece is fixed to a queen in this protocol; the field is
/// accepted for compatibility and defaults to `"queen"` when omitted.
/// No legality checking happens here; anything the rules engine will
/// not accept, including garbage squares, comes back as an illegal-move
/// rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    #[serde(default = "default_promotion")]
    pub promotion: String,
}

impl MoveRequest {
    /// Trim and lowercase the fields so `E2` and `e2 ` mean the same
    /// square by the time the engine sees them.
    pub fn normalized(&self) -> Self {
        Self {
            from: self.from.trim().to_lowercase(),
            to: self.to.trim().to_lowercase(),
            promotion: self.promotion.trim().to_lowercase(),
        }
    }
}
