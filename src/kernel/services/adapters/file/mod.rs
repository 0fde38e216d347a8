//! 本地文件访问

pub mod local;

pub use local::LocalFileProvider;
