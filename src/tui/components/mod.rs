pub mod banner;
pub mod chat_log;
pub mod input;
pub mod viewer;

pub use banner::{BannerKind, StatusBanner};
pub use chat_log::ChatLog;
pub use input::InputField;
pub use viewer::TranscriptView;
