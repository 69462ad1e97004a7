pub mod buffer;
pub mod view;
