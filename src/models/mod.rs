mod app_state;
pub use app_state::*;

mod error;
pub use error::*;

mod health;
pub use health::*;
