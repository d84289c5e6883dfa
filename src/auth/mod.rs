pub mod identity;

pub use identity::{ensure_admin, Identity, Role};
