use crate::math::{Real, Vector};
use crate::pipeline::{VoxelizeError, VoxelizeOptions};
use crate::shape::{PolyMesh, SourceObject};
use crate::spritesheet::{resolve_spritesheet_path, SpritesheetEncoder, SpritesheetImage};
use crate::transformation::{flatten_uvs, MeshAssembler};
use crate::voxelization::{
    LatticeSampler, MaterialSampler, OccupancyMap, PointSampler, SampleDomain, VoxelGrid,
    MAX_RESOLUTION,
};
use std::path::PathBuf;

/// A named mesh with a placement.
#[derive(Clone, Debug)]
pub struct MeshObject {
    /// The name of this object.
    pub name: String,
    /// The mesh of this object.
    pub mesh: PolyMesh,
    /// The location of this object.
    pub translation: Vector<Real>,
}

/// The result of a voxelization.
#[derive(Clone, Debug)]
pub struct Voxelization {
    /// The voxel mesh, named `<source>_voxel_mesh` and placed at the origin.
    pub object: MeshObject,
    /// The grid the source object was sampled on.
    pub grid: VoxelGrid,
    /// The occupied cells of `grid`.
    pub occupancy: OccupancyMap,
    /// The layered encoding of `occupancy`.
    pub spritesheet: SpritesheetImage,
}

/// The result of a voxelization, together with the outcome of its spritesheet export.
#[derive(Debug)]
pub struct VoxelizeOutput {
    /// The voxelization. Valid even if the export failed.
    pub voxelization: Voxelization,
    /// The path the spritesheet was saved to, or the reason why it couldn't be.
    pub spritesheet_export: Result<PathBuf, VoxelizeError>,
}

/// Converts meshes into meshes made of cubes.
#[derive(Clone, Debug, Default)]
pub struct Voxelizer<S = LatticeSampler> {
    options: VoxelizeOptions,
    sampler: S,
}

impl Voxelizer {
    /// A voxelizer using the [`LatticeSampler`].
    pub fn new(options: VoxelizeOptions) -> Self {
        Self::with_sampler(options, LatticeSampler)
    }
}

impl<S: PointSampler> Voxelizer<S> {
    /// A voxelizer generating the voxel samples with a custom point sampler.
    pub fn with_sampler(options: VoxelizeOptions, sampler: S) -> Self {
        Self { options, sampler }
    }

    /// The options of this voxelizer.
    pub fn options(&self) -> &VoxelizeOptions {
        &self.options
    }

    /// Voxelizes `source` without saving its spritesheet.
    ///
    /// `source` is not modified. Fails if the resolution is out of `[1, 250]`, if `source`
    /// has no face, or if its extent is zero or non-finite.
    pub fn build(&self, source: &SourceObject) -> Result<Voxelization, VoxelizeError> {
        let resolution = self.options.resolution;

        if resolution == 0 || resolution > MAX_RESOLUTION {
            return Err(VoxelizeError::InvalidResolution(resolution));
        }

        if source.mesh.num_faces() == 0 {
            return Err(VoxelizeError::EmptySource(source.name.clone()));
        }

        let baked = source.duplicate_baked();
        let grid = VoxelGrid::new(&baked.mesh.local_aabb(), resolution)?;
        let dims = grid.dims();
        log::info!(
            "Voxelizing {} at resolution {}: cube size {}, grid {}x{}x{}",
            source.name,
            resolution,
            grid.cube_size(),
            dims.x,
            dims.y,
            dims.z
        );

        let domain = if self.options.fill_volume {
            SampleDomain::Volume
        } else {
            SampleDomain::Surface
        };
        let samples = grid.sample(&self.sampler, &baked.mesh, domain);
        log::info!("Generated {} voxel samples.", samples.len());

        let occupancy = MaterialSampler::new(source).sample(&grid, &samples);
        log::info!("{} cells occupied.", occupancy.len());

        let spritesheet = SpritesheetEncoder.encode(&occupancy, &dims);

        let mut mesh = MeshAssembler::new(resolution, self.options.separate_cubes)
            .assemble(&grid, &occupancy, &baked);
        flatten_uvs(&mut mesh);

        let object = MeshObject {
            name: format!("{}_voxel_mesh", source.name),
            mesh,
            translation: Vector::zeros(),
        };
        log::info!(
            "Built {}: {} vertices, {} faces.",
            object.name,
            object.mesh.vertices().len(),
            object.mesh.num_faces()
        );

        Ok(Voxelization {
            object,
            grid,
            occupancy,
            spritesheet,
        })
    }

    /// Voxelizes `source` and saves its spritesheet.
    ///
    /// A failure to save the spritesheet doesn't invalidate the voxelization: it is
    /// reported in [`VoxelizeOutput::spritesheet_export`].
    pub fn voxelize(&self, source: &SourceObject) -> Result<VoxelizeOutput, VoxelizeError> {
        let voxelization = self.build(source)?;
        let path = resolve_spritesheet_path(
            self.options.spritesheet_path.as_deref(),
            &self.options.output_dir,
            &source.name,
            self.options.resolution,
        );

        let spritesheet_export = match voxelization.spritesheet.save(&path) {
            Ok(()) => Ok(path),
            Err(err) => {
                log::warn!(
                    "Failed to save the spritesheet to {}: {}",
                    path.display(),
                    err
                );
                Err(err)
            }
        };

        Ok(VoxelizeOutput {
            voxelization,
            spritesheet_export,
        })
    }
}

/// Voxelizes `source` with the given options and the [`LatticeSampler`].
pub fn voxelize(
    source: &SourceObject,
    options: VoxelizeOptions,
) -> Result<VoxelizeOutput, VoxelizeError> {
    Voxelizer::new(options).voxelize(source)
}
