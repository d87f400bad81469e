pub mod debug_log;
pub mod merge;
pub mod national;
pub mod pyramid;
pub mod sources;
pub mod svg;
pub mod table;
