//! # Neo Client
//!
//! The Node Client interface: the typed method surface a Neo N3 node
//! exposes to the transaction builder (invoke, fee calculation, block
//! count, broadcast, block tracking). This crate defines the
//! [`NodeClient`] trait and its associated data types only — it carries
//! no transport of its own. A concrete implementation (JSON-RPC over
//! HTTP, a WebSocket, an in-memory mock for tests) lives outside this
//! crate and is handed to `neo-builder`'s transaction builder by
//! reference.

#![warn(missing_debug_implementations, missing_docs, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

mod block;
mod client;
mod invocation;
mod network;
mod stack_item;

pub use block::Block;
pub use client::{track, BlockStream, InvokeSigner, NodeClient, SendRawTransactionResult};
pub use invocation::{ApplicationLog, ExecutionResult, InvocationResult, Notification, VmState};
pub use network::NetworkMagic;
pub use stack_item::StackItem;
