pub mod diagnostics;
pub mod error;
pub mod health;
pub mod messages;
pub mod run;

pub use diagnostics::*;
pub use error::*;
pub use health::*;
pub use messages::*;
pub use run::*;
