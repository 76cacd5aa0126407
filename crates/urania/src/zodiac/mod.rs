pub mod houses;
pub mod signs;

pub use houses::{find_house_equal, house_cusp, HousePlacement};
pub use signs::{
    sidereal_arc, Element, Modality, SiderealSign, SignArc, TropicalSign, ZodiacFrame, ZodiacSign,
    SIDEREAL_ARCS,
};
