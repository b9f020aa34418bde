pub mod api;
pub mod backend;
pub mod model;
