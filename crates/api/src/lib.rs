//! Types for communication between hanzi_server and its clients.

pub mod request;
pub mod response;
