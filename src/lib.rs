pub mod converter;
pub mod error;
pub mod song;

pub use converter::Converter;
pub use error::Error;
