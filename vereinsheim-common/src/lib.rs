pub mod markup;
pub mod model;
pub mod points;
