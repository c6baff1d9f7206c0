//! Tile type definitions and the catalog that owns them

use crate::algorithm::bitset::PossibilitySet;
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::DEFAULT_WEIGHT;
use crate::io::error::{AlgorithmError, Result, invalid_configuration};
use crate::spatial::adjacency::Adjacency;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const fn default_weight() -> u32 {
    DEFAULT_WEIGHT
}

/// One declared tile type
///
/// `neighbors[d]` lists the tile indices legal as the neighbor in direction
/// `d`, using the direction convention of the catalog's adjacency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    id: String,
    #[serde(default = "default_weight")]
    weight: u32,
    neighbors: Vec<Vec<usize>>,
}

impl TileType {
    /// Create a tile type definition
    pub fn new(id: impl Into<String>, weight: u32, neighbors: Vec<Vec<usize>>) -> Self {
        Self {
            id: id.into(),
            weight,
            neighbors,
        }
    }

    /// Unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Relative selection frequency
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Legal neighbor indices per direction
    pub fn neighbors(&self) -> &[Vec<usize>] {
        &self.neighbors
    }
}

/// Rule that holds in one direction only
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AsymmetricRule {
    /// Tile type that allows the neighbor
    pub tile: usize,
    /// Direction the rule applies in
    pub direction: usize,
    /// Neighbor that does not allow `tile` back
    pub neighbor: usize,
}

/// Read-only set of tile types plus the adjacency they are defined against
#[derive(Clone, Debug)]
pub struct Catalog {
    tile_types: Vec<TileType>,
    adjacency: Adjacency,
    /// `legal_neighbors[tile][direction]` as bitsets, legal from both sides
    legal_neighbors: Vec<Vec<PossibilitySet>>,
    asymmetric_rules: Vec<AsymmetricRule>,
}

impl Catalog {
    /// Validate tile type definitions and build the catalog
    ///
    /// A pairing is legal only when both tile types allow it. Rules declared
    /// by one side only are logged and dropped from the legal neighbor sets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if:
    /// - There are no tile types
    /// - Two tile types share an id
    /// - A weight is zero
    /// - A tile type does not list exactly one neighbor set per direction
    ///
    /// Returns `InvalidTileIndex` if a neighbor index is out of range.
    pub fn new(tile_types: Vec<TileType>, adjacency: Adjacency) -> Result<Self> {
        if tile_types.is_empty() {
            return Err(invalid_configuration(&"catalog has no tile types"));
        }

        let tile_count = tile_types.len();
        let direction_count = adjacency.direction_count();
        let mut seen = HashSet::with_capacity(tile_count);
        let mut declared = Vec::with_capacity(tile_count);

        for tile_type in &tile_types {
            if !seen.insert(tile_type.id.as_str()) {
                return Err(invalid_configuration(&format!(
                    "duplicate tile type id '{}'",
                    tile_type.id
                )));
            }
            if tile_type.weight == 0 {
                return Err(invalid_configuration(&format!(
                    "tile type '{}' has weight 0, weights must be positive",
                    tile_type.id
                )));
            }
            if tile_type.neighbors.len() != direction_count {
                return Err(invalid_configuration(&format!(
                    "tile type '{}' lists {} neighbor sets, {adjacency} needs {direction_count}",
                    tile_type.id,
                    tile_type.neighbors.len()
                )));
            }

            let mut per_direction = Vec::with_capacity(direction_count);
            for allowed in &tile_type.neighbors {
                if let Some(&index) = allowed.iter().find(|&&index| index >= tile_count) {
                    return Err(AlgorithmError::InvalidTileIndex {
                        index,
                        max_tiles: tile_count,
                    });
                }
                per_direction.push(PossibilitySet::from_indices(tile_count, allowed));
            }
            declared.push(per_direction);
        }

        let asymmetric_rules = find_asymmetric_rules(&declared, adjacency);
        for rule in &asymmetric_rules {
            log::warn!(
                "Dropping one-way rule: '{}' allows '{}' in direction {}",
                tile_types.get(rule.tile).map_or("?", TileType::id),
                tile_types.get(rule.neighbor).map_or("?", TileType::id),
                rule.direction
            );
        }

        let mut legal_neighbors = declared;
        for rule in &asymmetric_rules {
            if let Some(allowed) = legal_neighbors
                .get_mut(rule.tile)
                .and_then(|per_direction| per_direction.get_mut(rule.direction))
            {
                allowed.remove(rule.neighbor);
            }
        }

        Ok(Self {
            tile_types,
            adjacency,
            legal_neighbors,
            asymmetric_rules,
        })
    }

    /// Number of tile types
    pub const fn len(&self) -> usize {
        self.tile_types.len()
    }

    /// Whether the catalog is empty (never true for a constructed catalog)
    pub const fn is_empty(&self) -> bool {
        self.tile_types.is_empty()
    }

    /// All tile types in index order
    pub fn tile_types(&self) -> &[TileType] {
        &self.tile_types
    }

    /// Tile type at an index
    pub fn tile_type(&self, index: usize) -> Option<&TileType> {
        self.tile_types.get(index)
    }

    /// Adjacency the neighbor lists are defined against
    pub const fn adjacency(&self) -> Adjacency {
        self.adjacency
    }

    /// Id of the tile type at an index
    pub fn id_of(&self, index: usize) -> Option<&str> {
        self.tile_types.get(index).map(TileType::id)
    }

    /// Index of the tile type with the given id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.tile_types
            .iter()
            .position(|tile_type| tile_type.id == id)
    }

    /// Tile ids in index order
    pub fn ids(&self) -> Vec<String> {
        self.tile_types.iter().map(|t| t.id.clone()).collect()
    }

    /// Tile types legal next to `tile` in `direction`
    pub fn legal_neighbors(&self, tile: usize, direction: usize) -> Option<&PossibilitySet> {
        self.legal_neighbors
            .get(tile)
            .and_then(|per_direction| per_direction.get(direction))
    }

    /// Whether `neighbor` may sit next to `tile` in `direction`
    pub fn allows(&self, tile: usize, direction: usize, neighbor: usize) -> bool {
        self.legal_neighbors(tile, direction)
            .is_some_and(|set| set.contains(neighbor))
    }

    /// Declared rules that are not mirrored by the opposite direction
    ///
    /// These pairings are not part of [`Catalog::legal_neighbors`].
    pub fn asymmetric_rules(&self) -> &[AsymmetricRule] {
        &self.asymmetric_rules
    }

    /// Pick one candidate with probability proportional to its weight
    ///
    /// Draws a uniform integer in `[0, total weight)` and returns the first
    /// candidate whose running weight exceeds it.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidates` if `candidates` is empty, and
    /// `InvalidTileIndex` if a candidate is not in the catalog.
    pub fn weighted_pick(
        &self,
        candidates: &[usize],
        selector: &mut RandomSelector,
    ) -> Result<usize> {
        let mut total: u64 = 0;
        for &candidate in candidates {
            total += u64::from(self.weight_of(candidate)?);
        }

        let Some(draw) = selector.draw_below(total) else {
            return Err(AlgorithmError::EmptyCandidates);
        };

        let mut running: u64 = 0;
        for &candidate in candidates {
            running += u64::from(self.weight_of(candidate)?);
            if draw < running {
                return Ok(candidate);
            }
        }

        Err(crate::io::error::internal_error(
            "weighted_pick",
            &format!("draw {draw} not covered by total weight {total}"),
        ))
    }

    fn weight_of(&self, index: usize) -> Result<u32> {
        self.tile_types
            .get(index)
            .map(TileType::weight)
            .ok_or(AlgorithmError::InvalidTileIndex {
                index,
                max_tiles: self.tile_types.len(),
            })
    }
}

fn find_asymmetric_rules(
    declared: &[Vec<PossibilitySet>],
    adjacency: Adjacency,
) -> Vec<AsymmetricRule> {
    let declares = |tile: usize, direction: usize, neighbor: usize| {
        declared
            .get(tile)
            .and_then(|per_direction| per_direction.get(direction))
            .is_some_and(|set| set.contains(neighbor))
    };

    let mut rules = Vec::new();
    for (tile, per_direction) in declared.iter().enumerate() {
        for (direction, allowed) in per_direction.iter().enumerate() {
            let opposite = adjacency.opposite(direction);
            for neighbor in allowed.iter() {
                if !declares(neighbor, opposite, tile) {
                    rules.push(AsymmetricRule {
                        tile,
                        direction,
                        neighbor,
                    });
                }
            }
        }
    }
    rules
}
