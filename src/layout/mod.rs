pub mod engine;
pub mod platforms;
