pub mod recipes;

pub use recipes::recipes_route;
