pub mod angle;
pub mod vector3d;
