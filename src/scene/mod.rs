//! Scene objects and the free-fly camera

mod camera;

pub use camera::{Camera, CameraInput};

use glam::Vec3;

/// A named object with an editable transform
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl SceneObject {
    /// Create an object at the origin with unit scale
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

/// Ordered collection of scene objects
#[derive(Debug, Default)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new object and return it for further setup
    pub fn create(&mut self, name: impl Into<String>) -> &mut SceneObject {
        self.objects.push(SceneObject::new(name));
        let index = self.objects.len() - 1;
        &mut self.objects[index]
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut [SceneObject] {
        &mut self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_objects_have_identity_transform() {
        let object = SceneObject::new("Cube");
        assert_eq!(object.name, "Cube");
        assert_eq!(object.position, Vec3::ZERO);
        assert_eq!(object.rotation, Vec3::ZERO);
        assert_eq!(object.scale, Vec3::ONE);
    }

    #[test]
    fn create_preserves_insertion_order() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        scene.create("Camera");
        scene.create("Triangle");
        scene.create("Light").position.y = 4.0;

        assert_eq!(scene.len(), 3);
        let names: Vec<_> = scene.objects().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Camera", "Triangle", "Light"]);
        assert_eq!(scene.objects()[2].position.y, 4.0);
    }
}
