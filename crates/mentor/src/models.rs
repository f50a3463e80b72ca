pub mod agent;
pub mod message;
pub mod response;
