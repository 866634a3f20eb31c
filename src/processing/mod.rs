//! Resume-to-job matching engine

pub mod resources;
pub mod text_processor;
pub mod taxonomy;
pub mod skill_extractor;
pub mod similarity;
pub mod signals;
pub mod analyzer;
