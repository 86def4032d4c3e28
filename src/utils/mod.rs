pub mod ascii;
pub mod ring;

pub use ring::Ring;
