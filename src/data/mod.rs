pub mod frame;
pub mod series;

#[cfg(test)]
pub mod source;

pub use frame::FrameBuilder;
