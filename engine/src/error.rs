use crate::character::CharacterId;

/// Everything a roster mutation or a turn can refuse to do.
///
/// All variants are recoverable: the caller reports them and carries on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    #[error("id {0} is already in the arena")]
    DuplicateId(CharacterId),

    #[error("the name '{0}' is already in use")]
    DuplicateName(String),

    #[error("no character with id {0}")]
    NotFound(CharacterId),

    #[error("a character cannot attack itself")]
    SelfTarget,

    #[error("{0} is dead and cannot attack")]
    DeadActor(String),

    #[error("{0} is already dead")]
    DeadTarget(String),

    /// Raised by an Eternal for every incoming hit, whoever the attacker is.
    #[error("{0} is eternal: attacks against it are not allowed")]
    AttackNotAllowed(String),
}
