pub mod ratio;
pub mod records;
pub mod selection;
