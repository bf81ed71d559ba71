pub mod db;
pub mod grpc;
pub mod smtp;
