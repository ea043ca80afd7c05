pub mod session;
pub mod surface;
