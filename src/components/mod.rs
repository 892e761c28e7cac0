//! Built-in UI components

pub mod checkbox;
pub mod icon;
pub mod slider;
pub mod text_field;

pub use checkbox::Checkbox;
pub use icon::Icon;
pub use slider::Slider;
pub use text_field::TextField;
