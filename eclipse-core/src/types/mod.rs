//! Core data types

mod book;
mod list;
mod rating;
mod renter;
pub mod timestamp;

pub use book::{Book, ImageLinks};
pub use list::{List, UNTITLED};
pub use rating::{Rating, RatingMap};
pub use renter::{Renter, RentersBook};
