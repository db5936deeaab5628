pub mod camera;
pub mod graph;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene_object;
pub mod texture;
