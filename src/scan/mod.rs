pub mod scanner;
pub mod store;

pub use scanner::{ScanError, Scanner};
pub use store::ResultStore;
