use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, TexCoord, Vector};
use crate::shape::{Material, Triangle};
use crate::utils::PointKey;
use core::fmt;
use hashbrown::hash_map::{Entry, HashMap};
use na::Unit;
use std::sync::Arc;

/// Indicated an inconsistency while building a polygonal mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum PolyMeshBuilderError {
    /// A polygonal mesh must contain at least one face.
    #[error("a polygonal mesh must contain at least one face.")]
    EmptyFaces,
    /// A face has less than three vertices.
    #[error("the face {0} has less than three vertices.")]
    DegenerateFace(u32),
    /// A face references a vertex that doesn't exist.
    #[error("the face {face} references the vertex {vertex} which is out of bounds.")]
    InvalidVertexIndex {
        /// The face with the bad vertex reference.
        face: u32,
        /// The out-of-bounds vertex index.
        vertex: u32,
    },
    /// The number of texture coordinates doesn't match the number of face corners.
    #[error("expected {expected} texture coordinates (one per face corner), found {found}.")]
    UvCountMismatch {
        /// The number of face corners of the mesh.
        expected: usize,
        /// The number of texture coordinates given.
        found: usize,
    },
}

/// A face of a [`PolyMesh`].
///
/// The corners ("loops") of the face are the range `loop_start..loop_start + loop_total`
/// of the mesh's loop buffer.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Face {
    /// Index of the first corner of this face in the loop buffer.
    pub loop_start: u32,
    /// Number of corners of this face.
    pub loop_total: u32,
    /// Index of the material slot used by this face.
    pub material_index: u32,
}

impl Face {
    /// The range of this face's corners in the loop buffer.
    #[inline]
    pub fn loops(&self) -> core::ops::Range<usize> {
        self.loop_start as usize..(self.loop_start + self.loop_total) as usize
    }
}

/// A triangle of the fan triangulation of a [`PolyMesh`] face.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FaceTriangle {
    /// The face this triangle was cut from.
    pub face: u32,
    /// The three loops (face corners) of this triangle.
    pub loops: [u32; 3],
}

/// A polygonal mesh with per-face materials and optional per-corner texture coordinates.
///
/// Faces are arbitrary (planar, convex) polygons. Each face corner is called a "loop" and
/// references one vertex. Texture coordinates, when present, are stored per loop so two
/// faces sharing a vertex may map it to different UVs.
#[derive(Clone, Default)]
pub struct PolyMesh {
    vertices: Vec<Point<Real>>,
    faces: Vec<Face>,
    loops: Vec<u32>,
    uvs: Option<Vec<TexCoord>>,
    materials: Vec<Option<Arc<Material>>>,
}

impl fmt::Debug for PolyMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PolyMesh {{ vertices: {}, faces: {}, loops: {}, uvs: {}, materials: {} }}",
            self.vertices.len(),
            self.faces.len(),
            self.loops.len(),
            self.uvs.is_some(),
            self.materials.len()
        )
    }
}

impl PolyMesh {
    /// Creates a new polygonal mesh from a vertex buffer and a list of polygons.
    ///
    /// Each polygon is a list of indices into the vertex buffer. All the faces use the
    /// material slot 0.
    pub fn new<P: AsRef<[u32]>>(
        vertices: Vec<Point<Real>>,
        polygons: impl IntoIterator<Item = P>,
    ) -> Result<Self, PolyMeshBuilderError> {
        let mut faces = Vec::new();
        let mut loops = Vec::new();

        for (face_id, polygon) in polygons.into_iter().enumerate() {
            let polygon = polygon.as_ref();

            if polygon.len() < 3 {
                return Err(PolyMeshBuilderError::DegenerateFace(face_id as u32));
            }

            if let Some(vertex) = polygon.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(PolyMeshBuilderError::InvalidVertexIndex {
                    face: face_id as u32,
                    vertex: *vertex,
                });
            }

            faces.push(Face {
                loop_start: loops.len() as u32,
                loop_total: polygon.len() as u32,
                material_index: 0,
            });
            loops.extend_from_slice(polygon);
        }

        if faces.is_empty() {
            return Err(PolyMeshBuilderError::EmptyFaces);
        }

        Ok(Self {
            vertices,
            faces,
            loops,
            uvs: None,
            materials: Vec::new(),
        })
    }

    /// Creates a polygonal mesh from its raw buffers, without any validity check.
    ///
    /// Every face must have at least three loops within the bounds of `loops`, every loop
    /// must reference a vertex of `vertices`, and `uvs` must have one entry per loop.
    pub(crate) fn from_raw_parts(
        vertices: Vec<Point<Real>>,
        faces: Vec<Face>,
        loops: Vec<u32>,
        uvs: Option<Vec<TexCoord>>,
        materials: Vec<Option<Arc<Material>>>,
    ) -> Self {
        Self {
            vertices,
            faces,
            loops,
            uvs,
            materials,
        }
    }

    /// Sets the per-loop texture coordinates of this mesh.
    ///
    /// There must be exactly one texture coordinate per face corner, in loop order.
    pub fn with_uvs(mut self, uvs: Vec<TexCoord>) -> Result<Self, PolyMeshBuilderError> {
        self.set_uvs(uvs)?;
        Ok(self)
    }

    /// Sets the material slots of this mesh.
    pub fn with_materials(mut self, materials: Vec<Option<Arc<Material>>>) -> Self {
        self.materials = materials;
        self
    }

    /// Sets the material slot used by each face.
    ///
    /// Extra entries are ignored, missing ones leave the corresponding faces unchanged.
    pub fn with_face_materials(mut self, material_indices: &[u32]) -> Self {
        for (face, index) in self.faces.iter_mut().zip(material_indices) {
            face.material_index = *index;
        }
        self
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The faces of this mesh.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The number of faces of this mesh.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The loop buffer of this mesh: the vertex index of every face corner.
    #[inline]
    pub fn loops(&self) -> &[u32] {
        &self.loops
    }

    /// The per-loop texture coordinates of this mesh, if any.
    #[inline]
    pub fn uvs(&self) -> Option<&[TexCoord]> {
        self.uvs.as_deref()
    }

    /// Mutable access to the per-loop texture coordinates of this mesh, if any.
    #[inline]
    pub fn uvs_mut(&mut self) -> Option<&mut [TexCoord]> {
        self.uvs.as_deref_mut()
    }

    /// Replaces the texture coordinates of this mesh.
    pub fn set_uvs(&mut self, uvs: Vec<TexCoord>) -> Result<(), PolyMeshBuilderError> {
        if uvs.len() != self.loops.len() {
            return Err(PolyMeshBuilderError::UvCountMismatch {
                expected: self.loops.len(),
                found: uvs.len(),
            });
        }

        self.uvs = Some(uvs);
        Ok(())
    }

    /// Replaces the texture coordinates of this mesh, which must have one entry per loop.
    pub(crate) fn reset_uvs(&mut self, uvs: Vec<TexCoord>) {
        debug_assert_eq!(uvs.len(), self.loops.len());
        self.uvs = Some(uvs);
    }

    /// The material slots of this mesh.
    #[inline]
    pub fn materials(&self) -> &[Option<Arc<Material>>] {
        &self.materials
    }

    /// Mutable access to the material slots of this mesh.
    #[inline]
    pub fn materials_mut(&mut self) -> &mut Vec<Option<Arc<Material>>> {
        &mut self.materials
    }

    /// The material in the slot used by the given face, if any.
    pub fn face_material(&self, face: u32) -> Option<&Arc<Material>> {
        let slot = self.faces.get(face as usize)?.material_index as usize;
        self.materials.get(slot)?.as_ref()
    }

    /// Sets the material slot used by the given face.
    #[inline]
    pub fn set_face_material(&mut self, face: u32, material_index: u32) {
        self.faces[face as usize].material_index = material_index;
    }

    /// The vertex indices of the corners of the given face.
    #[inline]
    pub fn face_vertices(&self, face: u32) -> &[u32] {
        &self.loops[self.faces[face as usize].loops()]
    }

    /// The positions of the corners of the given face.
    pub fn face_points(&self, face: u32) -> impl ExactSizeIterator<Item = Point<Real>> + '_ {
        self.face_vertices(face)
            .iter()
            .map(|i| self.vertices[*i as usize])
    }

    /// The texture coordinates of the corners of the given face, if this mesh has any.
    #[inline]
    pub fn face_uvs(&self, face: u32) -> Option<&[TexCoord]> {
        let range = self.faces[face as usize].loops();
        self.uvs.as_ref().map(|uvs| &uvs[range])
    }

    /// Mutable access to the texture coordinates of the corners of the given face.
    #[inline]
    pub fn face_uvs_mut(&mut self, face: u32) -> Option<&mut [TexCoord]> {
        let range = self.faces[face as usize].loops();
        self.uvs.as_mut().map(|uvs| &mut uvs[range])
    }

    /// The center of the given face (the average of its corners).
    pub fn face_center(&self, face: u32) -> Point<Real> {
        let n = self.faces[face as usize].loop_total as Real;
        let sum = self
            .face_points(face)
            .fold(Vector::zeros(), |acc, pt| acc + pt.coords);
        Point::from(sum / n)
    }

    /// The normal of the given face, assuming its corners are ordered counter-clockwise.
    ///
    /// This uses Newell's method so non-triangular faces get a sensible normal too.
    /// Returns `None` if the face is degenerate.
    pub fn face_normal(&self, face: u32) -> Option<Unit<Vector<Real>>> {
        let verts = self.face_vertices(face);
        let mut normal = Vector::zeros();

        for (i, curr) in verts.iter().enumerate() {
            let next = verts[(i + 1) % verts.len()];
            let a = self.vertices[*curr as usize];
            let b = self.vertices[next as usize];
            normal.x += (a.y - b.y) * (a.z + b.z);
            normal.y += (a.z - b.z) * (a.x + b.x);
            normal.z += (a.x - b.x) * (a.y + b.y);
        }

        Unit::try_new(normal, crate::math::DEFAULT_EPSILON)
    }

    /// The fan triangulation of every face of this mesh.
    pub fn face_triangles(&self) -> impl Iterator<Item = FaceTriangle> + '_ {
        self.faces.iter().enumerate().flat_map(|(face_id, face)| {
            let first = face.loop_start;
            (1..face.loop_total - 1).map(move |k| FaceTriangle {
                face: face_id as u32,
                loops: [first, first + k, first + k + 1],
            })
        })
    }

    /// The triangle with the given loops as corners.
    #[inline]
    pub fn loop_triangle(&self, loops: [u32; 3]) -> Triangle {
        Triangle::new(
            self.vertices[self.loops[loops[0] as usize] as usize],
            self.vertices[self.loops[loops[1] as usize] as usize],
            self.vertices[self.loops[loops[2] as usize] as usize],
        )
    }

    /// The local-space `Aabb` of this mesh.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points_ref(&self.vertices)
    }

    /// Replaces in-place every vertex of this mesh by its image through `f`.
    pub fn map_vertices(&mut self, f: impl Fn(&Point<Real>) -> Point<Real>) {
        self.vertices.iter_mut().for_each(|pt| *pt = f(pt));
    }

    /// Scales in-place the vertices of this mesh, component-wise, relative to `center`.
    pub fn scale_vertices(&mut self, center: &Point<Real>, scale: &Vector<Real>) {
        self.vertices.iter_mut().for_each(|pt| {
            *pt = center + (*pt - center).component_mul(scale);
        });
    }

    /// Translates in-place the vertices of this mesh.
    pub fn translate_vertices(&mut self, shift: &Vector<Real>) {
        self.vertices.iter_mut().for_each(|pt| *pt += shift);
    }

    /// Appends a second mesh to this mesh.
    ///
    /// The faces of `rhs` keep their material indices, interpreted against the material
    /// slots of `self`. Texture coordinates are kept only if both meshes have some.
    pub fn append(&mut self, rhs: &PolyMesh) {
        let base_vertex = self.vertices.len() as u32;
        let base_loop = self.loops.len() as u32;

        self.vertices.extend_from_slice(&rhs.vertices);
        self.loops
            .extend(rhs.loops.iter().map(|i| *i + base_vertex));
        self.faces.extend(rhs.faces.iter().map(|face| Face {
            loop_start: face.loop_start + base_loop,
            ..*face
        }));

        match (&mut self.uvs, &rhs.uvs) {
            (Some(uvs), Some(rhs_uvs)) => uvs.extend_from_slice(rhs_uvs),
            _ => self.uvs = None,
        }
    }

    /// Merges the given meshes into a single one.
    ///
    /// The result has no material slots. Returns `None` if `meshes` is empty.
    pub fn merged<'a>(meshes: impl IntoIterator<Item = &'a PolyMesh>) -> Option<PolyMesh> {
        let mut meshes = meshes.into_iter();
        let mut result = meshes.next()?.clone();
        result.materials.clear();

        for mesh in meshes {
            result.append(mesh);
        }

        Some(result)
    }

    /// Merge all the vertices with exactly identical positions and adjust the loop buffer
    /// accordingly.
    ///
    /// Faces and loops are left untouched (so texture coordinates stay valid): only the
    /// vertices they reference change. Returns the number of vertices removed.
    pub fn merge_duplicate_vertices(&mut self) -> usize {
        let mut vtx_to_id = HashMap::with_capacity(self.vertices.len());
        let mut new_vertices = Vec::with_capacity(self.vertices.len());
        let mut remap = Vec::with_capacity(self.vertices.len());

        for pt in &self.vertices {
            let id = match vtx_to_id.entry(PointKey::new(pt)) {
                Entry::Occupied(entry) => *entry.get(),
                Entry::Vacant(entry) => {
                    let id = new_vertices.len() as u32;
                    new_vertices.push(*pt);
                    *entry.insert(id)
                }
            };
            remap.push(id);
        }

        self.loops
            .iter_mut()
            .for_each(|i| *i = remap[*i as usize]);

        let removed = self.vertices.len() - new_vertices.len();
        new_vertices.shrink_to_fit();
        self.vertices = new_vertices;
        removed
    }
}
