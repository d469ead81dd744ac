//! Audio format encoders

pub mod wav;
