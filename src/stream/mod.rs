pub mod extract;
pub mod types;


pub use extract::{string_image, UserRecord};
pub use types::*;
