//! LLVM context ownership.

use llvm_sys::core::{LLVMContextCreate, LLVMContextDispose};
use llvm_sys::prelude::LLVMContextRef;

use crate::builder::Builder;
use crate::module::Module;

/// An LLVM context. Every module, type and value created inside it is freed
/// when the context is disposed, so modules and builders must not outlive
/// the context they were created in.
pub struct Context(pub LLVMContextRef);

impl Context {
    pub fn new() -> Context {
        Context(unsafe { LLVMContextCreate() })
    }

    pub fn create_module(&self, name: &str) -> Module {
        Module::new(self.0, name)
    }

    pub fn create_builder(&self) -> Builder {
        Builder::new(self.0)
    }

    pub fn as_raw(&self) -> LLVMContextRef {
        self.0
    }
}

impl Default for Context {
    fn default() -> Context {
        Context::new()
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        unsafe { LLVMContextDispose(self.0) }
    }
}
