pub mod compiler;
pub mod operators;
pub mod planner;
pub mod unique;
