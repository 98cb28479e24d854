pub mod gemini_client;
pub mod generator;
pub mod normalize;
pub mod prompt;
