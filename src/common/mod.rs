pub mod error;
pub mod extract;
pub mod pagination;
pub mod patch;
pub mod resource;
pub mod response;
pub mod upload;
pub mod validation;
