pub mod answer;
pub mod prompt;
pub mod transcript;
pub mod video;

pub use answer::*;
pub use transcript::*;
pub use video::*;
