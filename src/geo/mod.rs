pub mod dat;

pub use dat::{decode_geosite, load_geosite};
