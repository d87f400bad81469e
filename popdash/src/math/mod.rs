pub mod interp;
pub mod scale;
