pub mod hex;
pub mod space;

pub use hex::ParseHexError;
pub use space::{delta_e76, hsv_to_rgb, lab_to_rgb, rgb_to_lab, Lab, Rgb};
