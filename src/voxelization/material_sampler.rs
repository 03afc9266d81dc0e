use crate::math::{Point, Real};
use crate::query::PolyMeshProjector;
use crate::shape::{material_slots_color, SourceObject};
use crate::utils::Progress;
use crate::voxelization::{OccupancyMap, Occupant, VoxelGrid, VoxelSample};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Finds the material of the source mesh surface closest to each voxel sample.
///
/// The source mesh is only read. Closest-point queries run in the local space of the
/// source object and are accelerated by a [`PolyMeshProjector`].
#[derive(Clone, Debug)]
pub struct MaterialSampler<'a> {
    source: &'a SourceObject,
    projector: PolyMeshProjector<'a>,
}

impl<'a> MaterialSampler<'a> {
    /// Prepares the closest-point queries on `source`.
    pub fn new(source: &'a SourceObject) -> Self {
        Self {
            source,
            projector: PolyMeshProjector::new(&source.mesh),
        }
    }

    /// The occupant of the cell containing the world-space point `pt`.
    ///
    /// The occupant has no material if the closest face uses an empty or out-of-range
    /// material slot.
    pub fn sample_point(&self, pt: &Point<Real>) -> Occupant {
        let local_pt = self.source.world_to_local(pt);
        let Some(proj) = self.projector.project_local_point(&local_pt) else {
            return Occupant::UNASSIGNED;
        };

        let mesh = &self.source.mesh;
        let slot = mesh.faces()[proj.face as usize].material_index;

        match mesh.materials().get(slot as usize) {
            Some(material @ Some(_)) => Occupant {
                material: Some(slot),
                color: material_slots_color(core::slice::from_ref(material)),
            },
            _ => Occupant::UNASSIGNED,
        }
    }

    /// Builds the occupancy map of the given samples.
    ///
    /// Samples falling outside of `grid` are skipped.
    pub fn sample(&self, grid: &VoxelGrid, samples: &[VoxelSample]) -> OccupancyMap {
        #[cfg(feature = "parallel")]
        let occupants: Vec<_> = samples
            .par_iter()
            .map(|sample| self.sample_point(&sample.position))
            .collect();
        #[cfg(not(feature = "parallel"))]
        let occupants: Vec<_> = samples
            .iter()
            .map(|sample| self.sample_point(&sample.position))
            .collect();

        let mut result = OccupancyMap::new();
        let mut progress = Progress::new("Material transfer", samples.len());
        let mut num_outside = 0;

        for (sample, occupant) in samples.iter().zip(occupants) {
            if grid.contains(&sample.index) {
                let _ = result.insert(sample.index, occupant);
            } else {
                num_outside += 1;
            }
            progress.step();
        }

        if num_outside > 0 {
            log::warn!("{} samples fell outside of the voxel grid.", num_outside);
        }

        result
    }
}
