pub mod vrgb;
