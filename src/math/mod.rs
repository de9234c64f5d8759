pub mod matrix;
pub mod modularity;
pub mod stats;
pub mod tdist;
