use crate::math::{Point, TexCoord};
use crate::shape::{
    ColorInput, LinkedNode, Material, PolyMesh, PolyMeshBuilderError, Rgba, ShaderNode,
    SourceObject,
};
use obj::{Group, IndexTuple, Obj, ObjData, ObjError, ObjMaterial, Object, SimplePolygon};
use std::path::Path;
use std::sync::Arc;

/// Errors raised while reading or writing Wavefront files.
///
/// This type is enabled by the `wavefront` feature flag.
#[derive(thiserror::Error, Debug)]
pub enum WavefrontError {
    /// The file could not be read or parsed.
    #[error(transparent)]
    Obj(#[from] ObjError),
    /// The parsed geometry isn't a valid polygonal mesh.
    #[error(transparent)]
    Mesh(#[from] PolyMeshBuilderError),
    /// The file could not be created.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn material_from_obj(material: &ObjMaterial) -> Material {
    match material {
        ObjMaterial::Ref(name) => Material::new(name.clone()),
        ObjMaterial::Mtl(mtl) => {
            let base_color = if mtl.map_kd.is_some() {
                Some(ColorInput::Linked(LinkedNode::ImageTexture { has_image: true }))
            } else {
                mtl.kd.map(|kd| ColorInput::Value(Rgba::from(kd)))
            };

            let material = Material::new(mtl.name.clone());
            match base_color {
                Some(base_color) => material.with_node(ShaderNode::Principled { base_color }),
                None => material,
            }
        }
    }
}

fn obj_material_name(material: &ObjMaterial) -> &str {
    match material {
        ObjMaterial::Ref(name) => name,
        ObjMaterial::Mtl(mtl) => &mtl.name,
    }
}

impl SourceObject {
    /// Loads a source object from a Wavefront (`.obj`) file and its material libraries.
    ///
    /// The object is named after the file stem. Missing material libraries are not an
    /// error: the affected materials just don't resolve to any color.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn from_obj_file(path: &Path) -> Result<Self, WavefrontError> {
        let mut obj = Obj::load(path)?;

        if let Err(err) = obj.load_mtls() {
            log::warn!("Failed to load the material libraries of {}: {:?}", path.display(), err);
        }

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_obj_data(name, &obj.data)
    }

    /// Builds a source object from parsed Wavefront data.
    ///
    /// Every `usemtl` statement becomes a material slot, in order of first appearance.
    /// Texture coordinates are kept only if every polygon corner has one.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn from_obj_data(name: impl Into<String>, data: &ObjData) -> Result<Self, WavefrontError> {
        let vertices = data
            .position
            .iter()
            .map(|p| Point::new(p[0], p[1], p[2]))
            .collect();

        let mut polygons = Vec::new();
        let mut face_materials = Vec::new();
        let mut uvs = Some(Vec::new());
        let mut slot_names: Vec<&str> = Vec::new();
        let mut materials = Vec::new();

        for group in data.objects.iter().flat_map(|object| &object.groups) {
            let slot = match &group.material {
                Some(material) => {
                    let name = obj_material_name(material);
                    match slot_names.iter().position(|n| *n == name) {
                        Some(slot) => slot,
                        None => {
                            slot_names.push(name);
                            materials.push(Some(Arc::new(material_from_obj(material))));
                            slot_names.len() - 1
                        }
                    }
                }
                None => 0,
            };

            for poly in &group.polys {
                polygons.push(poly.0.iter().map(|t| t.0 as u32).collect::<Vec<_>>());
                face_materials.push(slot as u32);

                if let Some(uvs) = &mut uvs {
                    for t in &poly.0 {
                        match t.1.and_then(|i| data.texture.get(i)) {
                            Some(uv) => uvs.push(TexCoord::new(uv[0], uv[1])),
                            None => {
                                uvs.clear();
                                break;
                            }
                        }
                    }
                }

                if uvs.as_ref().is_some_and(|uvs| uvs.is_empty()) {
                    uvs = None;
                }
            }
        }

        let mut mesh = PolyMesh::new(vertices, polygons)?
            .with_materials(materials)
            .with_face_materials(&face_materials);

        if let Some(uvs) = uvs {
            mesh.set_uvs(uvs)?;
        }

        Ok(SourceObject::new(name, mesh))
    }
}

impl PolyMesh {
    /// Converts this mesh to Wavefront data.
    ///
    /// Faces are grouped by material slot. Each group refers to its material by name,
    /// no material library is generated.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_data(&self) -> ObjData {
        let has_uvs = self.uvs().is_some();
        let num_slots = self
            .faces()
            .iter()
            .map(|f| f.material_index as usize + 1)
            .max()
            .unwrap_or(0);

        let groups = (0..num_slots)
            .filter_map(|slot| {
                let polys: Vec<_> = self
                    .faces()
                    .iter()
                    .filter(|face| face.material_index as usize == slot)
                    .map(|face| {
                        SimplePolygon(
                            face.loops()
                                .map(|l| {
                                    let uv = has_uvs.then_some(l);
                                    IndexTuple(self.loops()[l] as usize, uv, None)
                                })
                                .collect(),
                        )
                    })
                    .collect();

                if polys.is_empty() {
                    return None;
                }

                let material = self
                    .materials()
                    .get(slot)
                    .and_then(|m| m.as_ref())
                    .map(|m| ObjMaterial::Ref(m.name.clone()));

                Some(Group {
                    name: format!("slot{slot}"),
                    index: 0,
                    material,
                    polys,
                })
            })
            .collect();

        ObjData {
            position: self.vertices().iter().map(|v| [v.x, v.y, v.z]).collect(),
            texture: self
                .uvs()
                .map(|uvs| uvs.iter().map(|uv| [uv.x, uv.y]).collect())
                .unwrap_or_default(),
            objects: vec![Object {
                name: String::new(),
                groups,
            }],
            ..Default::default()
        }
    }

    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: &Path) -> Result<(), WavefrontError> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.to_obj_data().write_to_buf(&mut file)?;
        Ok(())
    }
}
