//! Results of asking a node to invoke a script or contract method without
//! broadcasting it.

use neo_types::Hash160;

use crate::stack_item::StackItem;

/// Terminal VM state after running a script to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Halt,
    Fault,
}

impl VmState {
    pub fn is_halt(self) -> bool {
        matches!(self, Self::Halt)
    }

    pub fn is_fault(self) -> bool {
        matches!(self, Self::Fault)
    }
}

/// The outcome of `invoke_script`/`invoke_function`: the node runs the
/// script against its current state without persisting anything, and
/// reports what it would have cost and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationResult {
    pub state: VmState,
    pub gas_consumed: u64,
    pub stack: Vec<StackItem>,
    /// Populated when `state` is `Fault`; the VM's exception text.
    pub exception: Option<String>,
}

/// A single notification (`System.Runtime.Notify`) emitted while a
/// transaction executed.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub contract: Hash160,
    pub event_name: String,
    pub state: StackItem,
}

/// One trigger's execution record within an [`ApplicationLog`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionResult {
    pub trigger: String,
    pub vm_state: VmState,
    pub gas_consumed: u64,
    pub stack: Vec<StackItem>,
    pub notifications: Vec<Notification>,
    pub exception: Option<String>,
}

/// The persisted record of a transaction's on-chain execution, returned by
/// `get_application_log`. `None` when the node holds no log for the hash
/// (typically: not yet included in a block).
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationLog {
    pub tx_hash: neo_types::Hash256,
    pub executions: Vec<ExecutionResult>,
}
