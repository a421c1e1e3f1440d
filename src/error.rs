use crate::block::{Mode, Where};
use thiserror::Error;

/// Failures the emitter can surface. Both variants mean "no code was
/// produced": an unhandled combination is a logic error in the block
/// program, while a missing generator is a known hole the host may choose
/// to paper over. Missing operands are not errors; sockets fall back to
/// documented defaults so an unfinished block still emits.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error("Unhandled combination ({block}): {} at {}.", .mode.name(), .location.name())]
    UnhandledCombination {
        block: &'static str,
        mode: Mode,
        location: Where,
    },

    #[error("No Arduino generator exists for '{block}'.")]
    NoGenerator { block: &'static str },
}
