pub mod access_rule;
pub mod authenticated_identity;

pub use access_rule::*;
pub use authenticated_identity::*;
