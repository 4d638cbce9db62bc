pub mod engine;
pub mod models;
pub mod rules;
pub mod split;

pub use engine::Resolver;
pub use models::{AudioFormat, PreviewResult, VideoFormat};
pub use rules::SourceRules;
pub use split::split_formats;
