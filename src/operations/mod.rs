mod bounding_sphere;
mod obb_dito;
mod obb_pca;

pub use bounding_sphere::compute_bounding_sphere;
pub use obb_dito::compute_obb;
pub use obb_pca::compute_pca_obb;
