//! # Neo Compiler
//!
//! Lowers a structured class/method IR — the shape a JVM class-file
//! reader would hand off — into NeoVM bytecode plus a contract manifest
//! (§4.6). [`compile`] is the single entry point; everything else is the
//! machinery it drives: the input [`ClassIr`]/[`MethodIr`] shapes, the
//! pragma map annotations resolve to, the two-pass [`NeoModule`] layout,
//! and the [`Manifest`] the ABI is assembled into.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use neo_compiler::{compile, ClassIr, ManifestConfig, PragmaMap};
//!
//! let (nef, manifest) = compile(&classes, &pragmas, ManifestConfig::default())?;
//! ```

#![warn(missing_debug_implementations, rust_2018_idioms, unreachable_pub)]
#![deny(rustdoc::broken_intra_doc_links)]
#![allow(missing_docs)]

mod ir;
mod lower;
mod manifest;
mod module;
mod pragma;

pub use ir::{
    ArithOp, BitwiseOp, ClassIr, CompareOp, EventShape, FieldIr, Instr, Instruction, JvmType,
    LocalVar, MethodIr, ShiftOp, TryRegion,
};
pub use lower::{emit_slot_prologue, emit_static_slot_prologue, lower_method, LowerCtx};
pub use manifest::{
    Abi, AbiEvent, AbiMethod, AbiParameter, ContractRef, Group, Manifest, ManifestConfig,
    Permission, PermissionMethods, WildcardMarker,
};
pub use module::{JumpCond, MethodId, NeoMethod, NeoModule};
pub use pragma::{PragmaEffect, PragmaMap, RawOpcode};

use std::collections::HashMap;

use neo_error::CompilerError;
use neo_types::{ContractParameterType, NefFile};

/// The `compiler` field every NEF this crate emits carries (§3's
/// `NefFile.compiler` fixed64 UTF-8 field).
const NEF_COMPILER_NAME: &str = "neo3-compiler";

/// Compiles a compilation unit — the contract's designated entry class
/// plus every `@Struct`/helper class it transitively uses — into a
/// `(NefFile, Manifest)` pair (§4.6).
///
/// `classes` must contain exactly one class with
/// [`ClassIr::is_contract_class`] set; its `public static` methods
/// become the manifest's exported ABI. `pragmas` resolves every
/// `InvokeStatic` target that isn't a plain call to another method in
/// `classes` (syscalls, inlined opcodes, dynamic contract calls).
/// `config` supplies the manifest fields this pass can't derive from
/// the IR itself — name, permissions, trusts, groups, supported
/// standards.
pub fn compile(
    classes: &[ClassIr],
    pragmas: &PragmaMap,
    config: ManifestConfig,
) -> Result<(NefFile, Manifest), CompilerError> {
    validate_class_tree(classes)?;
    let contract_class = find_contract_class(classes)?;
    let static_slots = assign_static_slots(classes)?;
    let class_table: HashMap<String, &ClassIr> =
        classes.iter().map(|c| (c.name.clone(), c)).collect();

    let mut module = NeoModule::new();
    for class in classes {
        for method in &class.methods {
            module.declare_method(method.symbol(&class.name), false);
        }
    }
    let init_id = module.declare_method("_initialize", true);

    for class in classes {
        for method_ir in &class.methods {
            let id = module
                .resolve_symbol(&method_ir.symbol(&class.name))
                .expect("every method was declared above before any lowering starts");
            lower_one_method(&mut module, pragmas, &class_table, &static_slots, &class.name, method_ir, id)?;
        }
    }
    lower_static_initializer(&mut module, pragmas, &class_table, &static_slots, contract_class, init_id)?;

    let exported = exported_methods(contract_class);
    // Addresses aren't known until `finalize` has run layout; resolve each
    // exported method's MethodId now, while methods are still addressed by
    // symbol, and read back `method_address` after.
    let exported_ids: Vec<(&MethodIr, MethodId)> = exported
        .into_iter()
        .map(|m| {
            let id = module
                .resolve_symbol(&m.symbol(&contract_class.name))
                .expect("exported methods were declared above");
            (m, id)
        })
        .collect();

    let script = module.finalize()?;

    let abi_methods = exported_ids
        .into_iter()
        .map(|(m, id)| manifest::AbiMethod {
            name: m.name.clone(),
            parameters: m
                .params
                .iter()
                .enumerate()
                .map(|(i, ty)| manifest::AbiParameter { name: format!("arg{i}"), ty: to_abi_type(ty) })
                .collect(),
            return_type: to_abi_type(&m.return_type),
            offset: module.method_address(id),
            safe: false,
        })
        .collect();

    let manifest = Manifest {
        name: config.name,
        groups: config.groups,
        supported_standards: config.supported_standards,
        abi: manifest::Abi { methods: abi_methods, events: harvest_events(classes) },
        permissions: config.permissions,
        trusts: config.trusts,
        extra: serde_json::json!({}),
    };

    // This compiler lowers every inter-contract call to a dynamic
    // `System.Contract.Call` SYSCALL (`lower::lower_contract_call`) rather
    // than the static `CALL_T` + method-token form, so the NEF's own token
    // table is always empty — nothing in the emitted script ever indexes
    // into it.
    let nef = NefFile::new(NEF_COMPILER_NAME, Vec::new(), script);

    Ok((nef, manifest))
}

/// Lowers one already-declared method's body into its module slot.
///
/// Takes the method out of the arena first ([`NeoModule::take_method`])
/// so the [`LowerCtx`] built around `module` for callee-symbol
/// resolution and the `&mut NeoMethod` being built don't alias the same
/// value.
fn lower_one_method(
    module: &mut NeoModule,
    pragmas: &PragmaMap,
    classes: &HashMap<String, &ClassIr>,
    static_slots: &HashMap<String, u8>,
    owner_class: &str,
    method_ir: &MethodIr,
    id: MethodId,
) -> Result<(), CompilerError> {
    let mut method = module.take_method(id);
    // A constructor's calling convention appends the freshly allocated
    // `this` array as an extra trailing parameter slot (§4.6 "Regular
    // `NEW`"; see `lower::lower_new`'s doc comment for the full shape).
    let param_count = if method_ir.is_constructor { method_ir.params.len() + 1 } else { method_ir.params.len() };
    emit_slot_prologue(&mut method, method_ir.locals.len(), param_count)?;
    {
        let mut ctx = LowerCtx { module: &*module, pragmas, classes, static_slots };
        lower_method(&mut ctx, owner_class, method_ir, &mut method)?;
    }
    module.replace_method(id, method);
    Ok(())
}

/// Lowers the synthetic `_initialize` method: its body is whatever the
/// contract class's `<clinit>` method (if the front end emitted one)
/// contains, or empty — either way it still gets its `INITSSLOT`
/// prologue (§4.6 "Static-slot method").
fn lower_static_initializer(
    module: &mut NeoModule,
    pragmas: &PragmaMap,
    classes: &HashMap<String, &ClassIr>,
    static_slots: &HashMap<String, u8>,
    contract_class: &ClassIr,
    init_id: MethodId,
) -> Result<(), CompilerError> {
    let mut method = module.take_method(init_id);
    emit_static_slot_prologue(&mut method, static_slots.len())?;
    match contract_class.methods.iter().find(|m| m.name == "<clinit>") {
        Some(clinit) => {
            let mut ctx = LowerCtx { module: &*module, pragmas, classes, static_slots };
            lower_method(&mut ctx, &contract_class.name, clinit, &mut method)?;
        }
        None => method.mark_label(0),
    }
    module.replace_method(init_id, method);
    Ok(())
}

/// Enforces §4.6's "Forbidden" list over the whole compilation unit.
///
/// Non-static fields and non-trivial instance constructors are only
/// permitted on `@Struct` classes (`is_struct`) or the contract class
/// itself (whose own constructor, if any, is the one the devpack calls
/// an `@OnDeployment`/no-arg initializer — this pass doesn't
/// distinguish the two, both are just `is_constructor` methods on the
/// contract class). Every other non-static method is rejected outright.
/// Inheritance is permitted only from `None` (the devpack's implicit
/// contract root) or from a class marked `is_struct`.
fn validate_class_tree(classes: &[ClassIr]) -> Result<(), CompilerError> {
    let by_name: HashMap<&str, &ClassIr> = classes.iter().map(|c| (c.name.as_str(), c)).collect();
    for class in classes {
        if let Some(super_name) = &class.super_class {
            let super_is_struct = by_name.get(super_name.as_str()).map(|c| c.is_struct).unwrap_or(false);
            if !super_is_struct {
                return Err(CompilerError::UnsupportedInheritance(class.name.clone()));
            }
        }
        for field in &class.fields {
            if !field.is_static && !class.is_struct {
                return Err(CompilerError::NonStaticField(format!("{}.{}", class.name, field.name)));
            }
        }
        for method in &class.methods {
            if method.name == "<clinit>" {
                continue;
            }
            if method.is_constructor {
                if !class.is_struct && !class.is_contract_class {
                    return Err(CompilerError::NonTrivialConstructor(format!("{}.{}", class.name, method.name)));
                }
                continue;
            }
            if !method.is_static {
                return Err(CompilerError::NonStaticMethod(format!("{}.{}", class.name, method.name)));
            }
        }
    }
    Ok(())
}

/// Finds the single class marked [`ClassIr::is_contract_class`].
fn find_contract_class(classes: &[ClassIr]) -> Result<&ClassIr, CompilerError> {
    let mut matches = classes.iter().filter(|c| c.is_contract_class);
    let first = matches.next().ok_or(CompilerError::NoContractClass)?;
    let total = 1 + matches.count();
    if total > 1 {
        return Err(CompilerError::MultipleContractClasses(total));
    }
    Ok(first)
}

/// Assigns sequential static slots across every class's static fields,
/// in class-then-declaration order, keyed `"Class.field"` the way
/// `Instr::GetStatic`/`PutStatic` name their target (§4.6 "Module and
/// slots").
fn assign_static_slots(classes: &[ClassIr]) -> Result<HashMap<String, u8>, CompilerError> {
    let mut slots = HashMap::new();
    let mut next: usize = 0;
    for class in classes {
        for field in &class.fields {
            if field.is_static {
                if next > 255 {
                    return Err(CompilerError::TooManyStaticFields(class.name.clone(), next));
                }
                slots.insert(format!("{}.{}", class.name, field.name), next as u8);
                next += 1;
            }
        }
    }
    Ok(slots)
}

/// A method is exported iff it's `public static` on the contract class
/// and not a constructor or the static initializer (§4.6 "ABI
/// exposure").
fn exported_methods(contract_class: &ClassIr) -> Vec<&MethodIr> {
    contract_class
        .methods
        .iter()
        .filter(|m| m.is_public && m.is_static && !m.is_constructor && m.name != "<clinit>")
        .collect()
}

/// Harvests every `Event*`-typed static field across the compilation
/// unit into the manifest's event list (§4.6 "Manifest").
fn harvest_events(classes: &[ClassIr]) -> Vec<manifest::AbiEvent> {
    classes
        .iter()
        .flat_map(|c| c.fields.iter())
        .filter_map(|f| f.event.as_ref())
        .map(|shape| manifest::AbiEvent {
            name: shape.display_name.clone(),
            parameters: shape
                .params
                .iter()
                .enumerate()
                .map(|(i, ty)| manifest::AbiParameter { name: format!("arg{i}"), ty: to_abi_type(ty) })
                .collect(),
        })
        .collect()
}

/// Projects a devpack value shape onto the manifest's ABI type set
/// (§4.6 "Manifest").
fn to_abi_type(ty: &JvmType) -> ContractParameterType {
    match ty {
        JvmType::Integer => ContractParameterType::Integer,
        JvmType::Boolean => ContractParameterType::Boolean,
        JvmType::ByteArray => ContractParameterType::ByteArray,
        JvmType::Str => ContractParameterType::String,
        JvmType::Hash160 => ContractParameterType::Hash160,
        JvmType::Hash256 => ContractParameterType::Hash256,
        JvmType::PublicKey => ContractParameterType::PublicKey,
        JvmType::Signature => ContractParameterType::Signature,
        JvmType::Array(_) => ContractParameterType::Array,
        JvmType::Map => ContractParameterType::Map,
        JvmType::Any => ContractParameterType::Any,
        JvmType::Void => ContractParameterType::Void,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trivial_contract() -> ClassIr {
        ClassIr {
            name: "Contract".into(),
            super_class: None,
            fields: vec![],
            methods: vec![MethodIr {
                name: "main".into(),
                is_static: true,
                is_public: true,
                params: vec![],
                return_type: JvmType::Void,
                locals: vec![],
                body: vec![Instruction { instr: Instr::Return, line: None }],
                try_regions: vec![],
                is_constructor: false,
            }],
            is_contract_class: true,
            is_struct: false,
        }
    }

    #[test]
    fn compiles_a_single_exported_method_into_a_nef_and_manifest() {
        let classes = vec![trivial_contract()];
        let pragmas = PragmaMap::new();
        let config = ManifestConfig { name: "TestContract".into(), ..Default::default() };

        let (nef, manifest) = compile(&classes, &pragmas, config).unwrap();

        assert_eq!(nef.compiler, NEF_COMPILER_NAME);
        assert!(nef.tokens.is_empty());
        assert!(!nef.script.is_empty());
        assert_eq!(manifest.abi.methods.len(), 1);
        assert_eq!(manifest.abi.methods[0].name, "main");
        // _initialize comes first in declaration order only if declared
        // first; here `main` is declared before `_initialize`, so its
        // offset is 0 (INITSSLOT-less body: RET).
        assert_eq!(manifest.abi.methods[0].offset, 0);
    }

    #[test]
    fn rejects_a_compilation_unit_with_no_contract_class() {
        let mut class = trivial_contract();
        class.is_contract_class = false;
        let err = compile(&[class], &PragmaMap::new(), ManifestConfig::default()).unwrap_err();
        assert!(matches!(err, CompilerError::NoContractClass));
    }

    #[test]
    fn rejects_a_non_static_field_outside_a_struct_class() {
        let mut class = trivial_contract();
        class.fields.push(FieldIr { name: "balance".into(), ty: JvmType::Integer, is_static: false, event: None });
        let err = compile(&[class], &PragmaMap::new(), ManifestConfig::default()).unwrap_err();
        assert!(matches!(err, CompilerError::NonStaticField(_)));
    }

    #[test]
    fn exported_methods_exclude_the_static_initializer_and_constructors() {
        let mut class = trivial_contract();
        class.methods.push(MethodIr {
            name: "<clinit>".into(),
            is_static: true,
            is_public: false,
            params: vec![],
            return_type: JvmType::Void,
            locals: vec![],
            body: vec![Instruction { instr: Instr::Return, line: None }],
            try_regions: vec![],
            is_constructor: false,
        });
        class.methods.push(MethodIr {
            name: "<init>".into(),
            is_static: false,
            is_public: false,
            params: vec![],
            return_type: JvmType::Void,
            locals: vec![],
            body: vec![Instruction { instr: Instr::Return, line: None }],
            try_regions: vec![],
            is_constructor: true,
        });
        let exported = exported_methods(&class);
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].name, "main");
    }

    #[test]
    fn static_slots_are_assigned_sequentially_across_classes() {
        let mut a = trivial_contract();
        a.fields.push(FieldIr { name: "owner".into(), ty: JvmType::Hash160, is_static: true, event: None });
        let mut b = trivial_contract();
        b.name = "Helper".into();
        b.is_contract_class = false;
        b.fields.push(FieldIr { name: "total".into(), ty: JvmType::Integer, is_static: true, event: None });

        let slots = assign_static_slots(&[a, b]).unwrap();
        assert_eq!(slots["Contract.owner"], 0);
        assert_eq!(slots["Helper.total"], 1);
    }
}
