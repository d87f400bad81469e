pub mod bars;
pub mod overlay;
pub mod pyramid;
pub mod ribbon;
pub mod transition;
