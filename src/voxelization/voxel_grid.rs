use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::pipeline::VoxelizeError;
use crate::shape::PolyMesh;
use crate::voxelization::{PointSampler, SampleDomain};
use na::{Point3, Vector3};

/// The largest resolution accepted by [`VoxelGrid::new`].
pub const MAX_RESOLUTION: u32 = 250;

/// The integer coordinates of a cell of a [`VoxelGrid`].
///
/// Indices computed from arbitrary points may lie outside of the grid, hence the
/// signed components. See [`VoxelGrid::contains`].
pub type GridIndex = Point3<i32>;

/// A point generated by a [`PointSampler`] together with the grid cell it falls into.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelSample {
    /// The world-space position of the sample.
    pub position: Point<Real>,
    /// The index of the grid cell containing the sample.
    pub index: GridIndex,
}

/// A regular grid of cubic cells covering the bounding box of a mesh.
///
/// The cell `(i, j, k)` is centered at `origin + (i, j, k) * cell_len` where `origin`
/// is the center of the first cell: `mins + cell_len / 2`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelGrid {
    mins: Point<Real>,
    cell_len: Real,
    dims: Vector3<u32>,
}

impl VoxelGrid {
    /// Computes the grid covering `aabb` at the given resolution.
    ///
    /// The largest side of `aabb` is split into `resolution` cells. Every other side gets
    /// as many cells of the same size as fit once rounded, and at least one.
    pub fn new(aabb: &Aabb, resolution: u32) -> Result<Self, VoxelizeError> {
        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(VoxelizeError::InvalidResolution(resolution));
        }

        let max_extent = aabb.max_extent();

        if !aabb.is_valid() || !max_extent.is_finite() || max_extent <= 0.0 {
            return Err(VoxelizeError::DegenerateSource(max_extent));
        }

        let cube_size = max_extent / (resolution as Real * 2.0);
        let cell_len = cube_size * 2.0;
        let dims = aabb
            .extents()
            .map(|e| ((e / cell_len).round() as u32).max(1));

        Ok(Self {
            mins: aabb.mins,
            cell_len,
            dims,
        })
    }

    /// Half the side length of a cell.
    #[inline]
    pub fn cube_size(&self) -> Real {
        self.cell_len / 2.0
    }

    /// The side length of a cell.
    #[inline]
    pub fn cell_len(&self) -> Real {
        self.cell_len
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn dims(&self) -> Vector3<u32> {
        self.dims
    }

    /// The total number of cells of this grid.
    #[inline]
    pub fn num_cells(&self) -> usize {
        self.dims.iter().map(|d| *d as usize).product()
    }

    /// The corner of the grid with the smallest coordinates.
    #[inline]
    pub fn mins(&self) -> Point<Real> {
        self.mins
    }

    /// The center of the cell `(0, 0, 0)`.
    #[inline]
    pub fn origin(&self) -> Point<Real> {
        self.mins + Vector::repeat(self.cell_len / 2.0)
    }

    /// The index of the cell containing `pt`.
    ///
    /// The result may lie outside of the grid.
    #[inline]
    pub fn index_of(&self, pt: &Point<Real>) -> GridIndex {
        ((pt - self.origin()) / self.cell_len)
            .map(|x| x.round() as i32)
            .into()
    }

    /// Does this grid contain the cell with the given index?
    #[inline]
    pub fn contains(&self, index: &GridIndex) -> bool {
        (0..3).all(|i| index[i] >= 0 && (index[i] as u32) < self.dims[i])
    }

    /// The coordinates of `pt` in lattice units.
    ///
    /// The cell `(i, j, k)` spans `[i, i + 1] x [j, j + 1] x [k, k + 1]` in lattice units,
    /// and the corner `mins` of the grid is mapped exactly to the origin.
    #[inline]
    pub fn to_lattice(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from((pt - self.mins) / self.cell_len)
    }

    /// The corner `corner` of the lattice underlying this grid.
    ///
    /// Cell `(i, j, k)` spans from the lattice point `(i, j, k)` to `(i + 1, j + 1, k + 1)`.
    /// Neighboring cells computed this way share bit-identical corners.
    #[inline]
    pub fn lattice_point(&self, corner: &GridIndex) -> Point<Real> {
        self.mins + corner.coords.map(|c| c as Real * self.cell_len)
    }

    /// The center of the cell with the given index.
    #[inline]
    pub fn cell_center(&self, index: &GridIndex) -> Point<Real> {
        self.origin() + index.coords.map(|c| c as Real * self.cell_len)
    }

    /// The closed box covered by the cell with the given index.
    #[inline]
    pub fn cell_aabb(&self, index: &GridIndex) -> Aabb {
        Aabb::new(
            self.lattice_point(index),
            self.lattice_point(&(*index + Vector3::repeat(1))),
        )
    }

    /// The range of cell indices, clamped to this grid, of the cells overlapping `aabb`.
    ///
    /// Returns `None` if no cell of the grid overlaps `aabb`.
    pub fn cell_range(&self, aabb: &Aabb) -> Option<(GridIndex, GridIndex)> {
        let mut mins = GridIndex::origin();
        let mut maxs = GridIndex::origin();

        for i in 0..3 {
            let lo = ((aabb.mins[i] - self.mins[i]) / self.cell_len).floor() - 1.0;
            let hi = ((aabb.maxs[i] - self.mins[i]) / self.cell_len).floor() + 1.0;
            let last = self.dims[i] as Real - 1.0;

            if hi < 0.0 || lo > last {
                return None;
            }

            mins[i] = lo.max(0.0) as i32;
            maxs[i] = hi.min(last) as i32;
        }

        Some((mins, maxs))
    }

    /// Iterates through all the cell indices of this grid, the `x` index varying the fastest.
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> {
        let dims = self.dims.map(|d| d as i32);
        (0..dims.z).flat_map(move |k| {
            (0..dims.y).flat_map(move |j| (0..dims.x).map(move |i| GridIndex::new(i, j, k)))
        })
    }

    /// Generates the voxel samples of `mesh`.
    ///
    /// The sampler generates world-space points for the surface of `mesh` (or its volume if
    /// `domain` is [`SampleDomain::Volume`]). Each point is then paired with the index of
    /// the cell containing it. Duplicate indices are kept.
    pub fn sample(
        &self,
        sampler: &impl PointSampler,
        mesh: &PolyMesh,
        domain: SampleDomain,
    ) -> Vec<VoxelSample> {
        let points = sampler.sample_points(mesh, self, domain);
        log::debug!(
            "Sampled {} points ({:?}) on a {}x{}x{} grid.",
            points.len(),
            domain,
            self.dims.x,
            self.dims.y,
            self.dims.z
        );

        points
            .into_iter()
            .map(|position| VoxelSample {
                position,
                index: self.index_of(&position),
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{GridIndex, VoxelGrid};
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Real, Vector};
    use crate::pipeline::VoxelizeError;

    fn unit_cube() -> Aabb {
        Aabb::from_half_extents(Point::origin(), Vector::repeat(0.5))
    }

    #[test]
    fn grid_dimensions() {
        let grid = VoxelGrid::new(&unit_cube(), 2).unwrap();
        assert_eq!(grid.dims(), na::Vector3::new(2, 2, 2));
        assert_relative_eq!(grid.cube_size(), 0.25);
        assert_relative_eq!(grid.cell_len(), 0.5);
        assert_relative_eq!(grid.origin(), Point::new(-0.25, -0.25, -0.25));

        let flat = Aabb::new(Point::origin(), Point::new(10.0, 2.0, 0.0));
        let grid = VoxelGrid::new(&flat, 10).unwrap();
        assert_eq!(grid.dims(), na::Vector3::new(10, 2, 1));
        assert_eq!(grid.num_cells(), 20);
        assert_eq!(grid.indices().count(), 20);
    }

    #[test]
    fn invalid_grids() {
        assert!(matches!(
            VoxelGrid::new(&unit_cube(), 0),
            Err(VoxelizeError::InvalidResolution(0))
        ));
        assert!(matches!(
            VoxelGrid::new(&unit_cube(), 251),
            Err(VoxelizeError::InvalidResolution(251))
        ));
        let point = Aabb::new(Point::origin(), Point::origin());
        assert!(matches!(
            VoxelGrid::new(&point, 8),
            Err(VoxelizeError::DegenerateSource(_))
        ));
        let infinite = Aabb::new(Point::origin(), Point::new(Real::INFINITY, 1.0, 1.0));
        assert!(VoxelGrid::new(&infinite, 8).is_err());
    }

    #[test]
    fn index_round_trip() {
        let mut rng = oorandom::Rand32::new(11);
        let aabb = Aabb::new(Point::new(-3.0, 1.0, 2.0), Point::new(4.0, 2.5, 9.0));
        let grid = VoxelGrid::new(&aabb, 37).unwrap();

        for _ in 0..1000 {
            let index = GridIndex::new(
                rng.rand_range(0..grid.dims().x) as i32,
                rng.rand_range(0..grid.dims().y) as i32,
                rng.rand_range(0..grid.dims().z) as i32,
            );
            let center = grid.cell_center(&index);
            // Stay strictly inside the cell.
            let jitter = Vector::new(
                rng.rand_float() - 0.5,
                rng.rand_float() - 0.5,
                rng.rand_float() - 0.5,
            ) * grid.cell_len()
                * 0.98;
            assert!(grid.contains(&index));
            assert_eq!(grid.index_of(&(center + jitter)), index);
            assert!(grid.cell_aabb(&index).contains_local_point(&center));
        }
    }

    #[test]
    fn cell_range_is_clamped() {
        let grid = VoxelGrid::new(&unit_cube(), 4).unwrap();
        let inner = Aabb::new(Point::new(-0.1, -0.1, -0.1), Point::new(0.1, 0.1, 0.1));
        let (mins, maxs) = grid.cell_range(&inner).unwrap();
        assert_eq!(mins, GridIndex::new(0, 0, 0));
        assert_eq!(maxs, GridIndex::new(3, 3, 3));

        let outside = Aabb::new(Point::new(5.0, 5.0, 5.0), Point::new(6.0, 6.0, 6.0));
        assert!(grid.cell_range(&outside).is_none());
    }
}
