use crate::scene::light::Light;
use crate::scene::material::{Material, MaterialId};
use crate::scene::scene_object::SceneObject;
use nalgebra::Point3;

/// Handle to an object in [`Scene::objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(pub usize);

/// Flat scene graph: lights, mesh instances, and the materials they reference.
#[derive(Debug, Default)]
pub struct Scene {
    pub lights: Vec<Light>,
    pub objects: Vec<SceneObject>,
    pub materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() - 1)
    }

    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0)
    }

    pub fn material_mut(&mut self, id: MaterialId) -> Option<&mut Material> {
        self.materials.get_mut(id.0)
    }

    /// The point the camera keeps looking at.
    pub fn origin(&self) -> Point3<f32> {
        Point3::origin()
    }

    pub fn visible_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter().filter(|o| o.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::mesh::Mesh;
    use std::sync::Arc;

    #[test]
    fn objects_can_share_one_material() {
        let mut scene = Scene::new();
        let shared = scene.add_material(Material::default());
        let mesh = Arc::new(Mesh::sphere(1.0, 8, 6));
        let a = scene.add_object(SceneObject::new("a", mesh.clone(), shared));
        let b = scene.add_object(SceneObject::new("b", mesh, shared));

        scene.material_mut(shared).unwrap().set_opacity(0.25);
        for id in [a, b] {
            let material = scene.object(id).unwrap().material;
            assert_eq!(scene.material(material).unwrap().opacity(), 0.25);
        }
        assert_eq!(scene.visible_objects().count(), 2);
    }
}
