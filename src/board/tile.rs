//! Board tiles and hex coordinates.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Cube coordinates of a hex; `q + r + s == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexPosition {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl HexPosition {
    #[must_use]
    pub const fn new(q: i32, r: i32, s: i32) -> Self {
        Self { q, r, s }
    }

    /// Distance in hex steps from the board center.
    #[must_use]
    pub fn ring(&self) -> i32 {
        self.q.abs().max(self.r.abs()).max(self.s.abs())
    }
}

impl std::fmt::Display for HexPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.q, self.r, self.s)
    }
}

/// Kind of tile that can occupy a space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileKind {
    City,
    Ocean,
    Greenery,
    /// Marker reserving a space for its owner.
    LandClaim,
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::City => "city",
            Self::Ocean => "ocean",
            Self::Greenery => "greenery",
            Self::LandClaim => "land-claim",
        })
    }
}

/// Celestial body a space belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TileLocation {
    Mars,
    /// Off-map spaces such as orbital cities.
    Space,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileOccupant {
    pub kind: TileKind,
    /// `None` for neutral tiles (oceans).
    pub owner: Option<PlayerId>,
}

/// A single board space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub position: HexPosition,
    pub location: TileLocation,
    /// Reserved for ocean tiles.
    pub ocean_space: bool,
    pub occupant: Option<TileOccupant>,
}

impl Tile {
    #[must_use]
    pub fn mars(position: HexPosition) -> Self {
        Self {
            position,
            location: TileLocation::Mars,
            ocean_space: false,
            occupant: None,
        }
    }

    #[must_use]
    pub fn space(position: HexPosition) -> Self {
        Self {
            location: TileLocation::Space,
            ..Self::mars(position)
        }
    }

    #[must_use]
    pub fn with_ocean_space(mut self) -> Self {
        self.ocean_space = true;
        self
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Whether this tile holds `kind`, optionally owned by `owner`.
    #[must_use]
    pub fn holds(&self, kind: TileKind, owner: Option<PlayerId>) -> bool {
        match self.occupant {
            Some(occupant) if occupant.kind == kind => {
                owner.map_or(true, |player| occupant.owner == Some(player))
            }
            _ => false,
        }
    }
}
