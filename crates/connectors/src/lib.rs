pub mod collection;
pub mod connector;
pub mod error;
pub mod results;
