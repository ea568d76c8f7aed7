pub mod assignment;
pub mod mood;
pub mod patient;
pub mod result;
pub mod sleep;
