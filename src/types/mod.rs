//! Value types for light control parameters.

mod brightness;
mod color;
mod family;

pub use brightness::Brightness;
pub use color::{Color, NamedColor};
pub use family::DeviceFamily;
