use crate::shape::Rgba;
use crate::voxelization::GridIndex;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// What occupies a cell of the voxel grid.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Occupant {
    /// The material slot of the source mesh sampled for this cell, if any.
    pub material: Option<u32>,
    /// The flat color of this cell.
    pub color: Rgba,
}

impl Occupant {
    /// An occupant without any material, rendered white.
    pub const UNASSIGNED: Occupant = Occupant {
        material: None,
        color: Rgba::WHITE,
    };
}

/// The set of occupied grid cells, in insertion order.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct OccupancyMap {
    cells: IndexMap<GridIndex, Occupant>,
}

impl OccupancyMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a cell as occupied.
    ///
    /// If the cell is already occupied, the existing occupant is kept unless it has no
    /// material and the new one does. Returns `true` if the map changed.
    pub fn insert(&mut self, index: GridIndex, occupant: Occupant) -> bool {
        match self.cells.entry(index) {
            Entry::Vacant(entry) => {
                let _ = entry.insert(occupant);
                true
            }
            Entry::Occupied(mut entry) => {
                if entry.get().material.is_none() && occupant.material.is_some() {
                    let _ = entry.insert(occupant);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// The occupant of the given cell, if it is occupied.
    #[inline]
    pub fn get(&self, index: &GridIndex) -> Option<&Occupant> {
        self.cells.get(index)
    }

    /// Is the given cell occupied?
    #[inline]
    pub fn contains(&self, index: &GridIndex) -> bool {
        self.cells.contains_key(index)
    }

    /// The number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Is no cell occupied?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates through the occupied cells, in insertion order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&GridIndex, &Occupant)> {
        self.cells.iter()
    }

    /// Iterates through the indices of the occupied cells, in insertion order.
    #[inline]
    pub fn indices(&self) -> impl ExactSizeIterator<Item = &GridIndex> {
        self.cells.keys()
    }
}

impl<'a> IntoIterator for &'a OccupancyMap {
    type Item = (&'a GridIndex, &'a Occupant);
    type IntoIter = indexmap::map::Iter<'a, GridIndex, Occupant>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
