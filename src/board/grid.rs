//! The game board: a fixed set of spaces and what occupies them.
//!
//! Only occupancy is tracked. Placement legality (adjacency, reserved
//! spaces, placement bonuses) is decided by the caller before `place`.

use serde::{Deserialize, Serialize};

use super::tile::{HexPosition, Tile, TileKind, TileLocation, TileOccupant};
use crate::core::{EngineError, PlayerId, Result};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    pub fn new(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    /// Hexagonal Mars map with `radius` rings around the center.
    ///
    /// Radius 4 gives the 61-space standard map.
    #[must_use]
    pub fn hexagon(radius: i32) -> Self {
        let mut tiles = Vec::new();
        for q in -radius..=radius {
            let r_min = (-radius).max(-q - radius);
            let r_max = radius.min(-q + radius);
            for r in r_min..=r_max {
                tiles.push(Tile::mars(HexPosition::new(q, r, -q - r)));
            }
        }
        Self { tiles }
    }

    /// Add an extra space (e.g. an off-map orbital space).
    #[must_use]
    pub fn with_tile(mut self, tile: Tile) -> Self {
        self.tiles.push(tile);
        self
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tile(&self, position: HexPosition) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.position == position)
    }

    /// Occupy a free space.
    pub fn place(&mut self, position: HexPosition, kind: TileKind, owner: Option<PlayerId>) -> Result<()> {
        let tile = self
            .tiles
            .iter_mut()
            .find(|t| t.position == position)
            .ok_or(EngineError::TileNotFound(position))?;
        if tile.is_occupied() {
            return Err(EngineError::TileOccupied(position));
        }
        tile.occupant = Some(TileOccupant { kind, owner });
        Ok(())
    }

    /// Tiles of `kind` anywhere, optionally restricted to one location.
    #[must_use]
    pub fn count_tiles(&self, kind: TileKind, location: Option<TileLocation>) -> usize {
        self.count_matching(kind, None, location)
    }

    /// Tiles of `kind` owned by `player`.
    #[must_use]
    pub fn count_player_tiles(
        &self,
        player: PlayerId,
        kind: TileKind,
        location: Option<TileLocation>,
    ) -> usize {
        self.count_matching(kind, Some(player), location)
    }

    fn count_matching(&self, kind: TileKind, owner: Option<PlayerId>, location: Option<TileLocation>) -> usize {
        self.tiles
            .iter()
            .filter(|t| location.map_or(true, |loc| t.location == loc))
            .filter(|t| t.holds(kind, owner))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_map_size() {
        assert_eq!(Board::hexagon(4).len(), 61);
        assert_eq!(Board::hexagon(0).len(), 1);
    }

    #[test]
    fn test_place_and_count() {
        let orbital = HexPosition::new(10, 0, -10);
        let mut board = Board::hexagon(2).with_tile(Tile::space(orbital));
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        board.place(HexPosition::new(0, 0, 0), TileKind::City, Some(p0)).unwrap();
        board.place(HexPosition::new(1, -1, 0), TileKind::City, Some(p1)).unwrap();
        board.place(orbital, TileKind::City, Some(p0)).unwrap();
        board.place(HexPosition::new(0, 1, -1), TileKind::Ocean, None).unwrap();

        assert_eq!(board.count_tiles(TileKind::City, None), 3);
        assert_eq!(board.count_tiles(TileKind::City, Some(TileLocation::Mars)), 2);
        assert_eq!(board.count_player_tiles(p0, TileKind::City, None), 2);
        assert_eq!(board.count_player_tiles(p0, TileKind::City, Some(TileLocation::Mars)), 1);
        assert_eq!(board.count_tiles(TileKind::Ocean, None), 1);
    }

    #[test]
    fn test_place_occupied_or_missing() {
        let mut board = Board::hexagon(1);
        let center = HexPosition::new(0, 0, 0);
        board.place(center, TileKind::Greenery, Some(PlayerId::new(0))).unwrap();

        assert!(matches!(
            board.place(center, TileKind::City, None),
            Err(EngineError::TileOccupied(_))
        ));
        assert!(matches!(
            board.place(HexPosition::new(5, 0, -5), TileKind::City, None),
            Err(EngineError::TileNotFound(_))
        ));
    }
}
