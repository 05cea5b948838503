pub mod events;
pub mod layout;
pub mod palette;
pub mod run;
pub mod state;
pub mod views;

pub use layout::*;
pub use palette::*;
pub use run::run;
pub use state::*;
