//! Re-export of the shared codec error type.
//!
//! Kept as its own module (rather than inlined in `lib.rs`) so call sites
//! can `use neo_codec::error::CodecError` to mirror the `Encoder`/`Decoder`
//! module layout; `neo_error::CodecError` remains the canonical definition.

pub use neo_error::CodecError;
