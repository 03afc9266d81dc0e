use crate::math::{Point, Real, Rotation, Vector};
use crate::shape::PolyMesh;

/// A named mesh placed in the world.
///
/// The placement maps a local point `p` to `translation + rotation * (scale ⊙ p)` where
/// `⊙` is the component-wise product.
#[derive(Clone, Debug)]
pub struct SourceObject {
    /// The name of this object.
    pub name: String,
    /// The mesh of this object, in local space.
    pub mesh: PolyMesh,
    /// The world-space position of this object.
    pub translation: Vector<Real>,
    /// The world-space orientation of this object.
    pub rotation: Rotation<Real>,
    /// The (possibly non-uniform) scale of this object.
    pub scale: Vector<Real>,
}

impl SourceObject {
    /// Creates an object with an identity placement.
    pub fn new(name: impl Into<String>, mesh: PolyMesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            translation: Vector::zeros(),
            rotation: Rotation::identity(),
            scale: Vector::repeat(1.0),
        }
    }

    /// Sets the translation of this object.
    pub fn with_translation(mut self, translation: Vector<Real>) -> Self {
        self.translation = translation;
        self
    }

    /// Sets the rotation of this object.
    pub fn with_rotation(mut self, rotation: Rotation<Real>) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets the scale of this object.
    pub fn with_scale(mut self, scale: Vector<Real>) -> Self {
        self.scale = scale;
        self
    }

    /// Maps a local-space point to world space.
    #[inline]
    pub fn local_to_world(&self, pt: &Point<Real>) -> Point<Real> {
        Point::from(self.translation + self.rotation * pt.coords.component_mul(&self.scale))
    }

    /// Maps a world-space point to local space.
    ///
    /// Axes with a zero scale are collapsed to zero.
    #[inline]
    pub fn world_to_local(&self, pt: &Point<Real>) -> Point<Real> {
        let unrotated = self.rotation.inverse_transform_vector(&(pt.coords - self.translation));
        Point::from(unrotated.zip_map(&self.scale, |x, s| if s != 0.0 { x / s } else { 0.0 }))
    }

    /// A copy of this object with its whole placement baked into the mesh vertices.
    ///
    /// The copy has an identity placement and shares the material slots of `self`.
    pub fn duplicate_baked(&self) -> SourceObject {
        let mut mesh = self.mesh.clone();
        mesh.map_vertices(|pt| self.local_to_world(pt));
        SourceObject::new(self.name.clone(), mesh)
    }
}
