pub mod normal;
pub mod physical;
