//! The input IR: classes, fields, methods, and the instruction set a
//! front end (a class-file reader, most naturally) hands to the lowering
//! pass. Instructions are already semantic — `GETSTATIC` of an `Event`
//! followed by a call to `send` arrives as one [`Instr::EventSend`], not
//! two raw opcodes the lowering pass has to pattern-match back together.

use num_bigint::BigInt;

/// The handful of value shapes the devpack exposes to contract authors.
/// These are exactly the types the manifest's ABI can describe (§4.6);
/// anything else is rejected before it reaches the lowering pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JvmType {
    Integer,
    Boolean,
    ByteArray,
    Str,
    Hash160,
    Hash256,
    PublicKey,
    Signature,
    Array(Box<JvmType>),
    Map,
    Any,
    Void,
}

/// A local variable or parameter slot, by its JVM-assigned index.
#[derive(Debug, Clone)]
pub struct LocalVar {
    pub index: u16,
    pub name: String,
    pub ty: JvmType,
}

/// A static or instance field. Non-static fields anywhere in the contract
/// class tree are rejected during [`crate::compile::compile`] (§4.6).
#[derive(Debug, Clone)]
pub struct FieldIr {
    pub name: String,
    pub ty: JvmType,
    pub is_static: bool,
    /// `Some` iff this field's declared type is one of the devpack's
    /// `Event*` interfaces — harvested into the manifest's event list.
    pub event: Option<EventShape>,
}

/// The parameter shape of an `Event` field, read off its generic type
/// arguments by the front end.
#[derive(Debug, Clone)]
pub struct EventShape {
    pub display_name: String,
    pub params: Vec<JvmType>,
}

/// Numeric/array/reference comparisons that can be fused with a
/// conditional jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// `IADD/ISUB/...` and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftOp {
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitwiseOp {
    And,
    Or,
    Xor,
}

/// One region of a method guarded by a JVM `try` block, by instruction
/// index into the owning method's [`MethodIr::body`].
#[derive(Debug, Clone)]
pub struct TryRegion {
    /// First guarded instruction.
    pub start: usize,
    /// One past the last guarded instruction.
    pub end: usize,
    /// First instruction of the handler.
    pub handler: usize,
    /// Where control resumes once the handler (or the guarded region,
    /// if it completes normally) finishes — the `ENDTRY` target.
    pub resume: usize,
    /// The local slot the caught value is stored into at the handler's
    /// prologue, if the source binds it to a variable.
    pub caught_local: Option<u16>,
}

/// A single semantic instruction in a method body. Jump/call targets are
/// indices into the owning method's [`MethodIr::body`] (intra-method) or
/// fully qualified symbol names (inter-method), resolved in the layout
/// pass ([`crate::module`]).
#[derive(Debug, Clone)]
pub enum Instr {
    /// `ICONST/BIPUSH/SIPUSH/LDC` of an integer or long constant.
    PushInt(BigInt),
    /// `LDC` of a string constant.
    PushString(String),
    PushBool(bool),
    PushNull,
    /// `ILOAD`/`ALOAD`/...; `is_arg` distinguishes a parameter slot from a
    /// local-variable slot (both are `LDARG_i`/`LDLOC_i` on NeoVM, which
    /// keeps two disjoint slot spaces where the JVM has one).
    Load { index: u16, is_arg: bool },
    Store { index: u16, is_arg: bool },
    Arith(ArithOp),
    Negate,
    Shift(ShiftOp),
    Bitwise(BitwiseOp),
    /// A fused comparison + branch, e.g. `IF_ICMPLT`. `target` is a body
    /// index; `negate` branches on comparison-false instead of -true, so
    /// a single comparison opcode can serve both `if (x < y)` and
    /// `if (!(x < y))` source shapes without inverting `op` itself.
    CondJump { op: CompareOp, target: usize, negate: bool },
    /// Reference (in)equality, never numeric.
    RefCondJump { equal: bool, target: usize },
    /// `IFNULL`/`IFNONNULL`.
    NullCondJump { target: usize, branch_if_null: bool },
    Goto(usize),
    /// `TABLESWITCH`/`LOOKUPSWITCH`; both lower identically (§4.6).
    Switch { cases: Vec<(BigInt, usize)>, default: usize },
    NewArray(JvmType),
    ArrayLoad,
    ArrayStore,
    ArrayLength,
    /// `INVOKESTATIC` of a method identified by fully qualified symbol
    /// (`"com.example.Contract.transfer"`-shaped). Resolution against
    /// the pragma map and the module's own method table happens in
    /// [`crate::lower`]. `has_return` matters only for the
    /// `@ContractHash` path, which drops an unused result.
    InvokeStatic { symbol: String, arg_count: usize, has_return: bool },
    GetStatic(String),
    PutStatic(String),
    /// `GETSTATIC` of an `Event` field immediately followed by a call to
    /// `send`; folded by the front end into one instruction (§4.6).
    EventSend { field: String, arg_count: usize },
    /// `NEW StringBuilder` through the final `toString`, folded into a
    /// `CAT` chain of `part_count` already-pushed operands.
    StringConcat { part_count: usize },
    /// `NEW Throwable/Exception/AssertionError(..)` through `ATHROW`,
    /// folded into one instruction. `message` is `None` for the
    /// zero-arg constructor form.
    ThrowNew { message: Option<String> },
    /// A bare `ATHROW` of an already-constructed exception value.
    Athrow,
    InstanceOf(String),
    CheckCast(String),
    /// Regular `NEW <class>` through its constructor call, with
    /// `ctor_arg_count` values already pushed by preceding instructions.
    New { class: String, ctor_arg_count: usize },
    Return,
    Pop,
}

/// One instruction plus its originating line, kept for diagnostics.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub instr: Instr,
    pub line: Option<u32>,
}

/// A method in the source IR.
#[derive(Debug, Clone)]
pub struct MethodIr {
    pub name: String,
    pub is_static: bool,
    pub is_public: bool,
    pub params: Vec<JvmType>,
    pub return_type: JvmType,
    pub locals: Vec<LocalVar>,
    pub body: Vec<Instruction>,
    pub try_regions: Vec<TryRegion>,
    /// `Some` names the constructor's own class iff this method is an
    /// instance initializer. Non-trivial bodies on anything but a
    /// `@Struct` or the contract root are rejected (§4.6).
    pub is_constructor: bool,
}

impl MethodIr {
    /// Fully qualified symbol this method is addressed by from
    /// `InvokeStatic`/`New`, e.g. `"Contract.transfer"`.
    pub fn symbol(&self, owner_class: &str) -> String {
        format!("{owner_class}.{}", self.name)
    }
}

/// A class in the source IR.
#[derive(Debug, Clone)]
pub struct ClassIr {
    pub name: String,
    pub super_class: Option<String>,
    pub fields: Vec<FieldIr>,
    pub methods: Vec<MethodIr>,
    /// Marks this as the contract's designated entry class; only its
    /// `public static` methods are exported (§4.6). Exactly one class in
    /// a compilation unit may set this.
    pub is_contract_class: bool,
    /// Marks this as an opt-in `@Struct` base: inheriting from it (and
    /// nothing else but `Object`) is permitted for field layout reuse.
    pub is_struct: bool,
}
