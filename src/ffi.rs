//! C-linkage entry points extending the LLVM C API.
//!
//! Each function here forwards straight into the C API with no state of its
//! own; the symbols are exported unmangled so non-Rust callers can link
//! against them the same way they link against `llvm-c` itself.

use std::ffi::c_char;
use std::ptr;

use llvm_sys::analysis::{LLVMVerifierFailureAction, LLVMVerifyFunction, LLVMVerifyModule};
use llvm_sys::core::{
    LLVMAddFunction, LLVMAddGlobal, LLVMCreateMessage, LLVMGetGlobalParent, LLVMGetNamedFunction,
    LLVMGetNamedGlobal,
};
use llvm_sys::prelude::{LLVMBool, LLVMModuleRef, LLVMTypeRef, LLVMValueRef};

/// Look up the function `name` in `module`, declaring it with `function_ty`
/// when it is not already present.
///
/// The type is only consulted on insertion; an existing function is
/// returned as-is even when its type differs. There is no failure path.
#[no_mangle]
pub unsafe extern "C" fn LLVMGetOrInsertFunction(
    module: LLVMModuleRef,
    name: *const c_char,
    function_ty: LLVMTypeRef,
) -> LLVMValueRef {
    let existing = LLVMGetNamedFunction(module, name);
    if !existing.is_null() {
        return existing;
    }
    LLVMAddFunction(module, name, function_ty)
}

/// Look up the global variable `name` in `module`, declaring it with `ty`
/// when it is not already present.
///
/// Same lookup-or-create policy as [`LLVMGetOrInsertFunction`]: the type is
/// ignored once a global of that name exists.
#[no_mangle]
pub unsafe extern "C" fn LLVMGetOrInsertGlobal(
    module: LLVMModuleRef,
    name: *const c_char,
    ty: LLVMTypeRef,
) -> LLVMValueRef {
    let existing = LLVMGetNamedGlobal(module, name);
    if !existing.is_null() {
        return existing;
    }
    LLVMAddGlobal(module, ty, name)
}

/// Verify a single function body.
///
/// Returns 1 when the verifier found a violation and 0 when the body is
/// well formed; the polarity matches `LLVMVerifyModule` (nonzero means
/// broken).
///
/// When `out_message` is non-null it always receives an owned buffer (empty
/// for a well-formed body) that the caller must release with
/// `LLVMDisposeMessage`, and diagnostics for a broken body are additionally
/// printed to stderr whatever `action` says. With
/// `LLVMAbortProcessAction` a broken body terminates the process after the
/// diagnostics are emitted; the call does not return in that case.
#[no_mangle]
pub unsafe extern "C" fn LLVMVerifyFunction2(
    func: LLVMValueRef,
    action: LLVMVerifierFailureAction,
    out_message: *mut *mut c_char,
) -> LLVMBool {
    let broken =
        LLVMVerifyFunction(func, LLVMVerifierFailureAction::LLVMReturnStatusAction) != 0;

    if !out_message.is_null() {
        *out_message = if broken {
            function_diagnostics(func)
        } else {
            LLVMCreateMessage(c"".as_ptr())
        };
        if broken && !matches!(action, LLVMVerifierFailureAction::LLVMAbortProcessAction) {
            LLVMVerifyFunction(func, LLVMVerifierFailureAction::LLVMPrintMessageAction);
        }
    } else if broken && matches!(action, LLVMVerifierFailureAction::LLVMPrintMessageAction) {
        LLVMVerifyFunction(func, LLVMVerifierFailureAction::LLVMPrintMessageAction);
    }

    if broken && matches!(action, LLVMVerifierFailureAction::LLVMAbortProcessAction) {
        // Prints the diagnostics and never returns.
        LLVMVerifyFunction(func, LLVMVerifierFailureAction::LLVMAbortProcessAction);
    }

    broken as LLVMBool
}

/// The C API has no per-function message variant, so diagnostic text is
/// recovered by re-running the verifier over the parent module. The buffer
/// may mention sibling symbols when several are broken at once.
unsafe fn function_diagnostics(func: LLVMValueRef) -> *mut c_char {
    let module = LLVMGetGlobalParent(func);
    let mut message = ptr::null_mut();
    LLVMVerifyModule(
        module,
        LLVMVerifierFailureAction::LLVMReturnStatusAction,
        &mut message,
    );
    if message.is_null() {
        LLVMCreateMessage(c"".as_ptr())
    } else {
        message
    }
}

/// Major version of the LLVM build this crate was compiled against.
#[no_mangle]
pub extern "C" fn LLVMVersionMajor() -> u32 {
    crate::version().0
}

/// Minor version of the LLVM build this crate was compiled against.
#[no_mangle]
pub extern "C" fn LLVMVersionMinor() -> u32 {
    crate::version().1
}
