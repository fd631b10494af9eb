//! 控制台输出

pub mod report;
