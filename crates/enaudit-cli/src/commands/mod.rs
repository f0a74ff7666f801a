pub mod building;
pub mod config;
pub mod illumination;
pub mod load;
