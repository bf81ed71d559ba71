//! Generated gRPC bindings for the Banter service protos.

pub mod accounts {
    tonic::include_proto!("accounts");
}
