//! Decoders generated by `build.rs` from the schemas in `schemas/`.

pub mod foo {
    include!(concat!(env!("OUT_DIR"), "/foo.rs"));
}

pub mod defaults_request {
    include!(concat!(env!("OUT_DIR"), "/defaults_request.rs"));
}

pub mod arrays_response {
    include!(concat!(env!("OUT_DIR"), "/arrays_response.rs"));
}

pub mod fetch_request {
    include!(concat!(env!("OUT_DIR"), "/fetch_request.rs"));
}

pub mod ints_only {
    include!(concat!(env!("OUT_DIR"), "/ints_only.rs"));
}

pub mod tree_response {
    include!(concat!(env!("OUT_DIR"), "/tree_response.rs"));
}

pub mod shadowing_request {
    include!(concat!(env!("OUT_DIR"), "/shadowing_request.rs"));
}

/// Generated source of the integer-only unit, for import checks.
pub const INTS_ONLY_SOURCE: &str = include_str!(concat!(env!("OUT_DIR"), "/ints_only.rs"));
