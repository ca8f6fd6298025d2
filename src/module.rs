//! Module handling, including the lookup-or-insert declaration helpers.

use llvm_sys::core::{
    LLVMAddFunction, LLVMAddGlobal, LLVMDisposeModule, LLVMDumpModule, LLVMGetFirstFunction,
    LLVMGetFirstGlobal, LLVMGetNamedFunction, LLVMGetNamedGlobal, LLVMGetNextFunction,
    LLVMGetNextGlobal, LLVMModuleCreateWithNameInContext, LLVMPrintModuleToString,
};
use llvm_sys::prelude::{LLVMContextRef, LLVMModuleRef};

use crate::analysis::{Verifier, VerifyError};
use crate::ffi;
use crate::types::{FunctionTy, Ty};
use crate::util;
use crate::value::{Function, GlobalValue, ValueIter};

/// A compilation unit holding functions and globals. Disposed on drop, so
/// it must not outlive the context that created it.
pub struct Module(pub LLVMModuleRef);

impl Module {
    pub fn new(ctx: LLVMContextRef, name: &str) -> Module {
        let c_name = util::cstring(name);
        Module(unsafe { LLVMModuleCreateWithNameInContext(c_name.as_ptr(), ctx) })
    }

    /// Returns the function `name`, declaring it with `sig` when missing.
    ///
    /// An existing declaration wins: `sig` is ignored in that case, and the
    /// same handle comes back on every call.
    pub fn get_or_insert_function(&self, name: &str, sig: &FunctionTy) -> Function {
        let c_name = util::cstring(name);
        Function(unsafe { ffi::LLVMGetOrInsertFunction(self.0, c_name.as_ptr(), sig.0) })
    }

    /// Returns the global `name`, declaring it with `ty` when missing.
    /// Same lookup-or-create policy as [`Module::get_or_insert_function`].
    pub fn get_or_insert_global(&self, name: &str, ty: &Ty) -> GlobalValue {
        let c_name = util::cstring(name);
        GlobalValue(unsafe { ffi::LLVMGetOrInsertGlobal(self.0, c_name.as_ptr(), ty.0) })
    }

    /// Add a function to the module with the name given.
    pub fn add_func(&self, name: &str, sig: &FunctionTy) -> Function {
        let c_name = util::cstring(name);
        Function(unsafe { LLVMAddFunction(self.0, c_name.as_ptr(), sig.0) })
    }

    /// Returns the function with the name given, or `None` if no function
    /// with that name exists.
    pub fn get_func(&self, name: &str) -> Option<Function> {
        let c_name = util::cstring(name);
        let func = unsafe { LLVMGetNamedFunction(self.0, c_name.as_ptr()) };
        if func.is_null() {
            None
        } else {
            Some(Function(func))
        }
    }

    /// Add an external global to the module with the given type and name.
    pub fn add_global(&self, name: &str, ty: &Ty) -> GlobalValue {
        let c_name = util::cstring(name);
        GlobalValue(unsafe { LLVMAddGlobal(self.0, ty.0, c_name.as_ptr()) })
    }

    /// Returns the global with the name given, or `None` if no global with
    /// that name exists.
    pub fn get_global(&self, name: &str) -> Option<GlobalValue> {
        let c_name = util::cstring(name);
        let global = unsafe { LLVMGetNamedGlobal(self.0, c_name.as_ptr()) };
        if global.is_null() {
            None
        } else {
            Some(GlobalValue(global))
        }
    }

    pub fn functions(&self) -> ValueIter<Function> {
        ValueIter::new(unsafe { LLVMGetFirstFunction(self.0) }, LLVMGetNextFunction)
    }

    pub fn global_values(&self) -> ValueIter<GlobalValue> {
        ValueIter::new(unsafe { LLVMGetFirstGlobal(self.0) }, LLVMGetNextGlobal)
    }

    /// Run the structural verifier over the whole module.
    pub fn verify(&self) -> Result<(), VerifyError> {
        Verifier::verify_module(self)
    }

    /// Render the module as textual IR.
    pub fn print_to_string(&self) -> String {
        unsafe { util::adopt_message(LLVMPrintModuleToString(self.0)) }
    }

    /// Dump the module to stderr (for debugging).
    pub fn dump(&self) {
        unsafe { LLVMDumpModule(self.0) }
    }

    pub fn as_raw(&self) -> LLVMModuleRef {
        self.0
    }
}

impl Drop for Module {
    fn drop(&mut self) {
        unsafe { LLVMDisposeModule(self.0) }
    }
}
