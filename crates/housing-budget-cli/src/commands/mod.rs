pub mod housing;
pub mod scenario;
