pub mod constants;
pub mod orbit;
