//! Function, global and value handles, plus module symbol iteration.

use std::ffi::c_uint;
use std::marker::PhantomData;

use llvm_sys::core::{LLVMAppendBasicBlock, LLVMGetParam, LLVMIsDeclaration};
use llvm_sys::prelude::{LLVMBasicBlockRef, LLVMValueRef};

use crate::analysis::{Verifier, VerifyError};
use crate::util;

/// A function declared in or defined by a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Function(pub LLVMValueRef);

impl Function {
    pub fn name(&self) -> String {
        unsafe { util::value_name(self.0) }
    }

    /// Append a new basic block to the end of the function body.
    pub fn append(&self, name: &str) -> BasicBlock {
        let c_name = util::cstring(name);
        BasicBlock(unsafe { LLVMAppendBasicBlock(self.0, c_name.as_ptr()) })
    }

    pub fn param(&self, index: u32) -> Value {
        Value(unsafe { LLVMGetParam(self.0, index as c_uint) })
    }

    /// True when the function has no body (a bare declaration).
    pub fn is_declaration(&self) -> bool {
        unsafe { LLVMIsDeclaration(self.0) != 0 }
    }

    pub fn verify(&self) -> Result<(), VerifyError> {
        Verifier::verify_func(self)
    }

    pub fn as_raw(&self) -> LLVMValueRef {
        self.0
    }
}

impl From<LLVMValueRef> for Function {
    fn from(value: LLVMValueRef) -> Function {
        Function(value)
    }
}

/// A module-level global variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlobalValue(pub LLVMValueRef);

impl GlobalValue {
    pub fn name(&self) -> String {
        unsafe { util::value_name(self.0) }
    }

    pub fn as_raw(&self) -> LLVMValueRef {
        self.0
    }
}

impl From<LLVMValueRef> for GlobalValue {
    fn from(value: LLVMValueRef) -> GlobalValue {
        GlobalValue(value)
    }
}

/// Any SSA value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Value(pub LLVMValueRef);

impl Value {
    pub fn as_raw(&self) -> LLVMValueRef {
        self.0
    }
}

/// A basic block inside a function body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasicBlock(pub LLVMBasicBlockRef);

/// Walks a module's symbol list through the C API's first/next pairs.
pub struct ValueIter<T> {
    next: LLVMValueRef,
    advance: unsafe extern "C" fn(LLVMValueRef) -> LLVMValueRef,
    marker: PhantomData<T>,
}

impl<T> ValueIter<T> {
    pub(crate) fn new(
        first: LLVMValueRef,
        advance: unsafe extern "C" fn(LLVMValueRef) -> LLVMValueRef,
    ) -> ValueIter<T> {
        ValueIter { next: first, advance, marker: PhantomData }
    }
}

impl<T: From<LLVMValueRef>> Iterator for ValueIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.next.is_null() {
            return None;
        }
        let current = self.next;
        self.next = unsafe { (self.advance)(current) };
        Some(T::from(current))
    }
}
