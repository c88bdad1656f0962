pub mod actor;
pub mod cinema_room;
pub mod genre;
pub mod movie;
pub mod review;
