use crate::math::{Real, Vector};
use crate::shape::{PolyMesh, SourceObject};
use crate::transformation::transfer_uvs;
use crate::utils::Progress;
use crate::voxelization::{GridIndex, OccupancyMap, VoxelGrid};

/// Builds the voxel mesh of an occupancy map.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MeshAssembler {
    resolution: u32,
    separate_cubes: bool,
}

impl MeshAssembler {
    /// An assembler scaling its output so the voxel mesh is `resolution` cubes wide.
    ///
    /// If `separate_cubes` is `false`, cubes sharing corners are welded together.
    pub fn new(resolution: u32, separate_cubes: bool) -> Self {
        Self {
            resolution,
            separate_cubes,
        }
    }

    /// Emits one cube per occupied cell and merges them in a single mesh.
    ///
    /// Cube corners are lattice points of `grid` so neighboring cubes have identical
    /// corners. Those are welded unless the cubes are kept separate.
    pub fn merge_cubes(&self, grid: &VoxelGrid, occupancy: &OccupancyMap) -> PolyMesh {
        let cubes: Vec<_> = occupancy
            .indices()
            .map(|index| grid.cell_aabb(index).to_poly_mesh())
            .collect();

        let Some(mut result) = PolyMesh::merged(&cubes) else {
            return PolyMesh::default();
        };
        log::debug!("Merged {} cubes.", occupancy.len());

        if self.separate_cubes {
            log::debug!("Kept cubes separate.");
        } else {
            let removed = result.merge_duplicate_vertices();
            log::debug!("Welded {} duplicate vertices.", removed);
        }

        result
    }

    /// Builds the voxel mesh of `occupancy`.
    ///
    /// `source` must be expressed in the same space as `grid`, typically the baked
    /// duplicate of the voxelized object. The result:
    /// - has texture coordinates transferred from `source`,
    /// - is scaled so its largest side is `resolution` units long,
    /// - has the non-empty material slots of `source`, each face using the material
    ///   sampled for the cell behind it,
    /// - is centered at the origin.
    pub fn assemble(
        &self,
        grid: &VoxelGrid,
        occupancy: &OccupancyMap,
        source: &SourceObject,
    ) -> PolyMesh {
        let mut result = self.merge_cubes(grid, occupancy);

        if result.num_faces() == 0 {
            log::warn!("No occupied cell, the voxel mesh is empty.");
            return result;
        }

        transfer_uvs(&mut result, &source.mesh);
        log::debug!("UV transfer applied.");

        let aabb = result.local_aabb();
        let scale = self.resolution as Real / aabb.max_extent();
        result.scale_vertices(&aabb.center(), &Vector::repeat(scale));
        log::debug!("Resized to unit cubes (factor {}).", scale);

        let slot_map = self.copy_materials(&mut result, source);
        self.assign_face_materials(&mut result, occupancy, &slot_map);

        let center = result.local_aabb().center();
        result.translate_vertices(&-center.coords);

        result
    }

    // Replaces the material slots of `mesh` by the non-empty ones of `source`. Returns,
    // for each slot of `source`, the corresponding slot of `mesh`.
    fn copy_materials(&self, mesh: &mut PolyMesh, source: &SourceObject) -> Vec<Option<u32>> {
        let materials = mesh.materials_mut();
        materials.clear();

        let slot_map = source
            .mesh
            .materials()
            .iter()
            .map(|slot| {
                slot.as_ref().map(|material| {
                    materials.push(Some(material.clone()));
                    materials.len() as u32 - 1
                })
            })
            .collect();

        log::debug!("Materials appended: {}", materials.len());
        slot_map
    }

    fn assign_face_materials(
        &self,
        mesh: &mut PolyMesh,
        occupancy: &OccupancyMap,
        slot_map: &[Option<u32>],
    ) {
        let aabb = mesh.local_aabb();
        let cell_len = aabb.max_extent() / self.resolution as Real;
        let origin = aabb.mins + Vector::repeat(cell_len / 2.0);
        let mut progress = Progress::new("Face material assign", mesh.num_faces());

        for face in 0..mesh.num_faces() as u32 {
            progress.step();

            let Some(normal) = mesh.face_normal(face) else {
                continue;
            };

            // The cell behind the face.
            let behind = mesh.face_center(face) - *normal * (cell_len / 2.0);
            let index: GridIndex = ((behind - origin) / cell_len)
                .map(|x| x.round() as i32)
                .into();

            let slot = occupancy
                .get(&index)
                .and_then(|occupant| occupant.material)
                .and_then(|slot| slot_map.get(slot as usize).copied().flatten());

            if let Some(slot) = slot {
                mesh.set_face_material(face, slot);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::MeshAssembler;
    use crate::bounding_volume::Aabb;
    use crate::math::{Point, Vector};
    use crate::shape::{Material, Rgba, SourceObject};
    use crate::voxelization::{GridIndex, OccupancyMap, Occupant, VoxelGrid};
    use std::sync::Arc;

    fn two_cells() -> (VoxelGrid, OccupancyMap) {
        let aabb = Aabb::new(Point::origin(), Point::new(2.0, 1.0, 1.0));
        let grid = VoxelGrid::new(&aabb, 2).unwrap();
        let mut map = OccupancyMap::new();
        let _ = map.insert(
            GridIndex::new(0, 0, 0),
            Occupant {
                material: Some(1),
                color: Rgba::WHITE,
            },
        );
        let _ = map.insert(GridIndex::new(1, 0, 0), Occupant::UNASSIGNED);
        (grid, map)
    }

    fn source() -> SourceObject {
        let mut mesh = crate::transformation::unit_cube_mesh();
        mesh.scale_vertices(&Point::origin(), &Vector::new(2.0, 1.0, 1.0));
        mesh.translate_vertices(&Vector::new(1.0, 0.5, 0.5));
        let mesh = mesh.with_materials(vec![
            Some(Arc::new(Material::new("first"))),
            None,
            Some(Arc::new(Material::new("third"))),
        ]);
        SourceObject::new("box", mesh)
    }

    #[test]
    fn welded_and_separate_cubes() {
        let (grid, map) = two_cells();
        let separate = MeshAssembler::new(2, true).merge_cubes(&grid, &map);
        assert_eq!(separate.vertices().len(), 16);
        assert_eq!(separate.num_faces(), 12);

        let welded = MeshAssembler::new(2, false).merge_cubes(&grid, &map);
        assert_eq!(welded.vertices().len(), 12);
        assert_eq!(welded.num_faces(), 12);
    }

    #[test]
    fn assembled_mesh_is_centered_and_unit_sized() {
        let (grid, map) = two_cells();
        let mesh = MeshAssembler::new(2, false).assemble(&grid, &map, &source());

        let aabb = mesh.local_aabb();
        assert_relative_eq!(aabb.center(), Point::origin(), epsilon = 1.0e-6);
        assert_relative_eq!(aabb.extents(), Vector::new(2.0, 1.0, 1.0), epsilon = 1.0e-6);
        assert_eq!(mesh.uvs().map(|uvs| uvs.len()), Some(48));

        let names: Vec<_> = mesh
            .materials()
            .iter()
            .map(|m| m.as_ref().unwrap().name.as_str())
            .collect();
        assert_eq!(names, ["first", "third"]);

        // The first cell sampled the empty slot 1 which has no merged counterpart.
        assert!(mesh.faces().iter().all(|f| f.material_index == 0));
    }

    #[test]
    fn faces_take_the_material_of_their_cell() {
        let (grid, _) = two_cells();
        let mut map = OccupancyMap::new();
        let _ = map.insert(
            GridIndex::new(0, 0, 0),
            Occupant {
                material: Some(2),
                color: Rgba::WHITE,
            },
        );
        let _ = map.insert(
            GridIndex::new(1, 0, 0),
            Occupant {
                material: Some(0),
                color: Rgba::WHITE,
            },
        );

        let mesh = MeshAssembler::new(2, true).assemble(&grid, &map, &source());

        for face in 0..mesh.num_faces() as u32 {
            let expected = if face < 6 { 1 } else { 0 };
            assert_eq!(mesh.faces()[face as usize].material_index, expected);
        }
    }

    #[test]
    fn empty_occupancy_gives_an_empty_mesh() {
        let (grid, _) = two_cells();
        let mesh = MeshAssembler::new(2, false).assemble(&grid, &OccupancyMap::new(), &source());
        assert_eq!(mesh.num_faces(), 0);
    }
}
