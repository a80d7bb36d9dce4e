pub mod codemsg;
pub mod settings;

pub use codemsg::CodeMessages;
pub use settings::*;
