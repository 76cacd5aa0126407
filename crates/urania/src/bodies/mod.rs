pub mod points;
pub mod resolver;

pub use points::{DerivedPoint, Point};
pub use resolver::{
    classify, classify_all, derive_points, find_point, format_position, resolve_bodies,
    resolve_points, CelestialBody, ResolvedPoint,
};
