use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};
use crate::query;
use crate::shape::{PolyMesh, Triangle};
use crate::voxelization::VoxelGrid;

/// How much, in lattice units, cells are enlarged when tested against the mesh faces.
///
/// Faces lying on the boundary of the grid are mapped to integer lattice coordinates up to
/// rounding errors, and must still touch the boundary cells.
const LATTICE_TOLERANCE: Real = 1.0e-4;

/// The region of a mesh a [`PointSampler`] generates points for.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum SampleDomain {
    /// Points on the mesh surface.
    #[default]
    Surface,
    /// Points on the mesh surface and inside of it.
    Volume,
}

/// A generator of points on, or inside, a mesh.
pub trait PointSampler {
    /// Generates world-space points covering the `domain` of `mesh`.
    ///
    /// The implementation is expected to generate exactly one point per cell of `grid`
    /// intersecting the domain, but callers must not rely on points being unique per cell.
    fn sample_points(
        &self,
        mesh: &PolyMesh,
        grid: &VoxelGrid,
        domain: SampleDomain,
    ) -> Vec<Point<Real>>;
}

/// The state of a grid cell while being classified.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum CellValue {
    Undefined,
    OutsideSurfaceToWalk,
    OutsideSurface,
    InsideSurface,
    OnSurface,
}

/// A point sampler generating the center of every grid cell touched by the sampled domain.
///
/// The surface domain is made of the cells whose closed box intersects a face of the mesh.
/// The volume domain also includes the cells that can't be reached from the border of the
/// grid without crossing a surface cell. On meshes that aren't closed, the fill leaks
/// through the holes and the volume domain degrades to the surface domain.
#[derive(Copy, Clone, Debug, Default)]
pub struct LatticeSampler;

struct CellClassification {
    dims: [usize; 3],
    data: Vec<CellValue>,
}

impl CellClassification {
    fn new(grid: &VoxelGrid) -> Self {
        let dims = grid.dims().map(|d| d as usize);
        Self {
            dims: [dims.x, dims.y, dims.z],
            data: vec![CellValue::Undefined; grid.num_cells()],
        }
    }

    #[inline]
    fn cell_id(&self, i: usize, j: usize, k: usize) -> usize {
        i + self.dims[0] * (j + self.dims[1] * k)
    }

    fn mark_surface(&mut self, mesh: &PolyMesh, grid: &VoxelGrid) {
        let half_cell = Vector::repeat(0.5 + LATTICE_TOLERANCE);

        for tri in mesh.face_triangles() {
            let world_triangle = mesh.loop_triangle(tri.loops);

            let Some((mins, maxs)) = grid.cell_range(&world_triangle.local_aabb()) else {
                continue;
            };

            // Cells are tested in lattice units, where their boxes have integer bounds.
            let triangle = Triangle::new(
                grid.to_lattice(&world_triangle.a),
                grid.to_lattice(&world_triangle.b),
                grid.to_lattice(&world_triangle.c),
            );

            for k in mins.z..=maxs.z {
                for j in mins.y..=maxs.y {
                    for i in mins.x..=maxs.x {
                        let id = self.cell_id(i as usize, j as usize, k as usize);

                        if self.data[id] == CellValue::OnSurface {
                            continue;
                        }

                        let center = Point::new(i as Real, j as Real, k as Real)
                            + Vector::repeat(0.5);
                        let cell = Aabb::from_half_extents(center, half_cell);
                        if query::intersection_test_aabb_triangle(&cell, &triangle) {
                            self.data[id] = CellValue::OnSurface;
                        }
                    }
                }
            }
        }
    }

    fn fill_volume(&mut self) {
        let [di, dj, dk] = self.dims;
        let mut to_walk = Vec::new();

        // Seed the walk with the border of the grid.
        for k in 0..dk {
            for j in 0..dj {
                for i in 0..di {
                    let on_border =
                        i == 0 || j == 0 || k == 0 || i == di - 1 || j == dj - 1 || k == dk - 1;
                    let id = self.cell_id(i, j, k);

                    if on_border && self.data[id] == CellValue::Undefined {
                        self.data[id] = CellValue::OutsideSurfaceToWalk;
                        to_walk.push([i, j, k]);
                    }
                }
            }
        }

        while let Some([i, j, k]) = to_walk.pop() {
            let id = self.cell_id(i, j, k);
            self.data[id] = CellValue::OutsideSurface;

            let neighbors = [
                (i > 0).then(|| [i - 1, j, k]),
                (i + 1 < di).then(|| [i + 1, j, k]),
                (j > 0).then(|| [i, j - 1, k]),
                (j + 1 < dj).then(|| [i, j + 1, k]),
                (k > 0).then(|| [i, j, k - 1]),
                (k + 1 < dk).then(|| [i, j, k + 1]),
            ];

            for [ni, nj, nk] in neighbors.into_iter().flatten() {
                let nid = self.cell_id(ni, nj, nk);

                if self.data[nid] == CellValue::Undefined {
                    self.data[nid] = CellValue::OutsideSurfaceToWalk;
                    to_walk.push([ni, nj, nk]);
                }
            }
        }

        for value in &mut self.data {
            if *value == CellValue::Undefined {
                *value = CellValue::InsideSurface;
            }
        }
    }
}

impl PointSampler for LatticeSampler {
    fn sample_points(
        &self,
        mesh: &PolyMesh,
        grid: &VoxelGrid,
        domain: SampleDomain,
    ) -> Vec<Point<Real>> {
        let mut cells = CellClassification::new(grid);
        cells.mark_surface(mesh, grid);

        if domain == SampleDomain::Volume {
            cells.fill_volume();
        }

        grid.indices()
            .zip(cells.data.iter())
            .filter(|(_, value)| {
                matches!(value, CellValue::OnSurface | CellValue::InsideSurface)
            })
            .map(|(index, _)| grid.cell_center(&index))
            .collect()
    }
}
