pub mod project;
pub mod serve;
