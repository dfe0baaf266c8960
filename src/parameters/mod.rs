//! Global parameters shared by all players of a game.

pub mod global;

pub use global::{GlobalParameters, ParameterSnapshot};
