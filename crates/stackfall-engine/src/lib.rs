pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HoldError {
    #[display("hold already used since the last lock")]
    AlreadyUsed,
    #[display("no falling piece to hold")]
    NoFallingPiece,
    #[display("session is not running")]
    NotRunning,
}
