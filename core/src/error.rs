use crate::staffing::StaffRoleId;
use thiserror::Error;

/// A player action rejected by validation. The state is guaranteed
/// untouched when one of these comes back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Insufficient funds: need ${needed}, have ${available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("Not enough power capacity: need {required_mw} MW, headroom {headroom_mw} MW")]
    InsufficientPower { required_mw: f64, headroom_mw: f64 },

    #[error("No staff available in role '{role}'")]
    NoStaffAvailable { role: StaffRoleId },

    #[error("No such candidate: index {index}")]
    UnknownCandidate { index: usize },

    #[error("No client offer is pending")]
    NoOfferPending,

    #[error("Company '{name}' already exists")]
    CompanyExists { name: String },

    #[error("The game has ended")]
    GameEnded,
}

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("No saved company named '{name}'")]
    CompanyNotFound { name: String },

    #[error(transparent)]
    Action(#[from] ActionError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
