//! NeoVM interop services: the named syscalls a script can invoke via
//! `SYSCALL`. Each resolves to a 4-byte hash the VM looks up at runtime.

use neo_crypto::sha256;

/// A NeoVM interop service, addressed by name at build time and by hash at
/// runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteropService {
    SystemCryptoCheckSig,
    SystemCryptoCheckMultisig,
    SystemContractCall,
    SystemContractCallNative,
    SystemContractGetCallFlags,
    SystemContractCreateStandardAccount,
    SystemContractCreateMultisigAccount,
    SystemIteratorNext,
    SystemIteratorValue,
    SystemRuntimePlatform,
    SystemRuntimeGetTrigger,
    SystemRuntimeGetTime,
    SystemRuntimeGetScriptContainer,
    SystemRuntimeGetExecutingScriptHash,
    SystemRuntimeGetCallingScriptHash,
    SystemRuntimeGetEntryScriptHash,
    SystemRuntimeCheckWitness,
    SystemRuntimeGetInvocationCounter,
    SystemRuntimeLog,
    SystemRuntimeNotify,
    SystemRuntimeGetNotifications,
    SystemRuntimeGasLeft,
    SystemRuntimeBurnGas,
    SystemRuntimeGetNetwork,
    SystemRuntimeGetRandom,
    SystemStorageGetContext,
    SystemStorageGetReadOnlyContext,
    SystemStorageAsReadOnly,
    SystemStorageGet,
    SystemStorageFind,
    SystemStoragePut,
    SystemStorageDelete,
}

impl InteropService {
    /// The ASCII name the Neo N3 node registers this service under.
    pub fn name(self) -> &'static str {
        use InteropService::*;
        match self {
            SystemCryptoCheckSig => "System.Crypto.CheckSig",
            SystemCryptoCheckMultisig => "System.Crypto.CheckMultisig",
            SystemContractCall => "System.Contract.Call",
            SystemContractCallNative => "System.Contract.CallNative",
            SystemContractGetCallFlags => "System.Contract.GetCallFlags",
            SystemContractCreateStandardAccount => "System.Contract.CreateStandardAccount",
            SystemContractCreateMultisigAccount => "System.Contract.CreateMultisigAccount",
            SystemIteratorNext => "System.Iterator.Next",
            SystemIteratorValue => "System.Iterator.Value",
            SystemRuntimePlatform => "System.Runtime.Platform",
            SystemRuntimeGetTrigger => "System.Runtime.GetTrigger",
            SystemRuntimeGetTime => "System.Runtime.GetTime",
            SystemRuntimeGetScriptContainer => "System.Runtime.GetScriptContainer",
            SystemRuntimeGetExecutingScriptHash => "System.Runtime.GetExecutingScriptHash",
            SystemRuntimeGetCallingScriptHash => "System.Runtime.GetCallingScriptHash",
            SystemRuntimeGetEntryScriptHash => "System.Runtime.GetEntryScriptHash",
            SystemRuntimeCheckWitness => "System.Runtime.CheckWitness",
            SystemRuntimeGetInvocationCounter => "System.Runtime.GetInvocationCounter",
            SystemRuntimeLog => "System.Runtime.Log",
            SystemRuntimeNotify => "System.Runtime.Notify",
            SystemRuntimeGetNotifications => "System.Runtime.GetNotifications",
            SystemRuntimeGasLeft => "System.Runtime.GasLeft",
            SystemRuntimeBurnGas => "System.Runtime.BurnGas",
            SystemRuntimeGetNetwork => "System.Runtime.GetNetwork",
            SystemRuntimeGetRandom => "System.Runtime.GetRandom",
            SystemStorageGetContext => "System.Storage.GetContext",
            SystemStorageGetReadOnlyContext => "System.Storage.GetReadOnlyContext",
            SystemStorageAsReadOnly => "System.Storage.AsReadOnly",
            SystemStorageGet => "System.Storage.Get",
            SystemStorageFind => "System.Storage.Find",
            SystemStoragePut => "System.Storage.Put",
            SystemStorageDelete => "System.Storage.Delete",
        }
    }

    /// The 4-byte hash (first four bytes of `SHA256(name)`) the VM dispatches on.
    pub fn hash(self) -> [u8; 4] {
        let digest = sha256(self.name().as_bytes());
        [digest[0], digest[1], digest[2], digest[3]]
    }

    /// Looks up a service by its lowercase hex-encoded 4-byte hash, as
    /// embedded in a disassembled `SYSCALL` operand.
    pub fn from_hash(hash_hex: &str) -> Option<Self> {
        use InteropService::*;
        const ALL: &[InteropService] = &[
            SystemCryptoCheckSig,
            SystemCryptoCheckMultisig,
            SystemContractCall,
            SystemContractCallNative,
            SystemContractGetCallFlags,
            SystemContractCreateStandardAccount,
            SystemContractCreateMultisigAccount,
            SystemIteratorNext,
            SystemIteratorValue,
            SystemRuntimePlatform,
            SystemRuntimeGetTrigger,
            SystemRuntimeGetTime,
            SystemRuntimeGetScriptContainer,
            SystemRuntimeGetExecutingScriptHash,
            SystemRuntimeGetCallingScriptHash,
            SystemRuntimeGetEntryScriptHash,
            SystemRuntimeCheckWitness,
            SystemRuntimeGetInvocationCounter,
            SystemRuntimeLog,
            SystemRuntimeNotify,
            SystemRuntimeGetNotifications,
            SystemRuntimeGasLeft,
            SystemRuntimeBurnGas,
            SystemRuntimeGetNetwork,
            SystemRuntimeGetRandom,
            SystemStorageGetContext,
            SystemStorageGetReadOnlyContext,
            SystemStorageAsReadOnly,
            SystemStorageGet,
            SystemStorageFind,
            SystemStoragePut,
            SystemStorageDelete,
        ];
        ALL.iter().copied().find(|service| hex::encode(service.hash()) == hash_hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_sig_hash_matches_known_value() {
        // First four bytes of sha256("System.Crypto.CheckSig"), the value
        // every Neo N3 node embeds for this syscall.
        assert_eq!(hex::encode(InteropService::SystemCryptoCheckSig.hash()), "56e7b327");
    }

    #[test]
    fn from_hash_round_trips() {
        let hex = hex::encode(InteropService::SystemRuntimeNotify.hash());
        assert_eq!(InteropService::from_hash(&hex), Some(InteropService::SystemRuntimeNotify));
    }

    #[test]
    fn unknown_hash_returns_none() {
        assert_eq!(InteropService::from_hash("ffffffff"), None);
    }
}
