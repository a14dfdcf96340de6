//! Runtime TypeScript modules embedded at compile time.
//!
//! These modules are written in TypeScript in the `runtime/` directory
//! and embedded into the generator binary using `include_str!`.

/// Default client skeleton: constructor, Basic auth and the `request` transport.
pub const CLIENT: &str = include_str!("../../runtime/client.ts");
