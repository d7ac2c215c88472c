pub mod safety;

pub use safety::{check_clause_safety, is_safe, SafetyError};
