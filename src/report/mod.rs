mod csv;
mod summary;
mod syllogism;

pub use csv::csv;
pub use summary::summary_text;
pub use syllogism::syllogism;
