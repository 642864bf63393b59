pub mod docx;
mod error;
pub mod outline;
pub mod proposal;

pub use error::Error;
pub use outline::{Outline, OutlineBlock};
pub use proposal::build_and_save;
