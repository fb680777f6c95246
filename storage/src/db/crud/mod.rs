//! CRUD operations for the tables of the library.

pub mod song;
