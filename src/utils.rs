pub mod logs;
pub mod pg;
