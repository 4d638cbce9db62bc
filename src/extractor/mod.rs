pub mod models;
pub mod traits;
pub mod ytdlp;

pub use models::{MediaInfo, RawFormat};
pub use traits::MediaExtractor;
pub use ytdlp::YtDlpExtractor;
