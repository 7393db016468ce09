pub mod play;
pub mod simulate;
