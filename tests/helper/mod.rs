#![allow(dead_code)]
#![allow(unused_imports)]

pub mod project;
pub mod registry;

pub use project::TestProject;
pub use registry::MockRegistry;
