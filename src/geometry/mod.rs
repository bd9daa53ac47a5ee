pub mod aabb;
pub mod frame;
pub mod obb;
pub mod sphere;

pub use aabb::Aabb;
pub use frame::Frame;
pub use obb::Obb;
pub use sphere::BoundingSphere;
