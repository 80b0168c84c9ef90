//! # Neo3 SDK Prelude
//!
//! Convenient imports for commonly used types and traits to make working
//! with Neo N3 more ergonomic.
//!
//! ```rust,ignore
//! use neo3::prelude::*;
//! ```
//!
//! ## Included categories
//!
//! - **Core types**: `Hash160`/`Hash256`, key pairs, Base58/WIF encoding
//! - **Errors**: the per-concern error enums (`CodecError`, `CryptoError`,
//!   `BuilderError`, `TransactionError`, `CompilerError`, `ClientError`)
//! - **Wire codec**: `Encoder`/`Decoder`/`NeoSerializable`, `OpCode`
//! - **Contract types**: `ContractParameter`, `NefFile`, `MethodToken`
//! - **Builders**: `ScriptBuilder`, `Signer`, `TransactionBuilder`, `Witness`
//! - **Client**: `NodeClient`, `NetworkMagic`, the invocation/block DTOs
//! - **Compiler**: the class-file IR and `compile()` entry point

// Core error types
pub use neo_error::{BuilderError, ClientError, CodecError, CompilerError, CryptoError, TransactionError};

// Hashes, keys, and address encoding
pub use neo_crypto::{
	build_multisig_verification_script, build_verification_script, hash160, hash256, sha256,
	signing_threshold, Hash160, Hash256, KeyPair, Secp256r1PrivateKey, Secp256r1PublicKey,
	Secp256r1Signature,
};

// Wire codec
pub use neo_codec::{Decoder, Encoder, NeoSerializable, OpCode};

// Contract-call parameter and NEF types
pub use neo_types::{Bytes, ContractParameter, ContractParameterMap, ContractParameterType, MethodToken, NefFile, ParameterValue};

// Witnesses, signer scopes, and transaction attributes
pub use neo_common::{OracleResponseCode, TransactionAttribute, Witness, WitnessAction, WitnessCondition, WitnessRule, WitnessScope};

// Script building, transaction building and signing
pub use neo_builder::{
	CallFlags, FeePolicy, InteropService, ScriptBuilder, ScriptReader, Signer, Transaction,
	TransactionBuilder, WitnessShape, WitnessSource, MAX_VALID_UNTIL_BLOCK_INCREMENT,
};

// The node-client abstraction the transaction builder drives
pub use neo_client::{
	track, ApplicationLog, Block, BlockStream, ExecutionResult, InvocationResult, InvokeSigner,
	NetworkMagic, NodeClient, Notification, SendRawTransactionResult, StackItem, VmState,
};

// The NeoVM smart-contract compiler
pub use neo_compiler::{
	compile, Abi, AbiEvent, AbiMethod, AbiParameter, ClassIr, FieldIr, Group, Instr, Instruction,
	Manifest, ManifestConfig, MethodIr, Permission, PermissionMethods,
};
