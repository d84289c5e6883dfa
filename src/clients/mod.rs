pub mod piston_client;

pub use piston_client::{PistonClient, PistonError, Runtime};
