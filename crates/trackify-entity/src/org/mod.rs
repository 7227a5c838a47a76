//! Name-keyed reference entities: roles and departments.

pub mod department;
pub mod role;

pub use department::Department;
pub use role::Role;
