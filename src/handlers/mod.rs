pub mod diagnostics;
pub mod health;
pub mod run;

pub use diagnostics::*;
pub use health::*;
pub use run::*;
