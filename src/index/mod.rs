pub mod posting;
pub mod inverted;
pub mod index_builder;
