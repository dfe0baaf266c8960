//! Board spaces and tile counting.

pub mod grid;
pub mod tile;

pub use grid::Board;
pub use tile::{HexPosition, Tile, TileKind, TileLocation, TileOccupant};
