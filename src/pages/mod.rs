pub mod overview;
pub mod try_it;
