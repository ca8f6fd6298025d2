//! Instruction builder. Covers just enough to put a body on a function.

use llvm_sys::core::{
    LLVMBuildAdd, LLVMBuildRet, LLVMBuildRetVoid, LLVMCreateBuilderInContext, LLVMDisposeBuilder,
    LLVMPositionBuilderAtEnd,
};
use llvm_sys::prelude::{LLVMBuilderRef, LLVMContextRef};

use crate::util;
use crate::value::{BasicBlock, Value};

pub struct Builder(pub LLVMBuilderRef);

impl Builder {
    pub fn new(ctx: LLVMContextRef) -> Builder {
        Builder(unsafe { LLVMCreateBuilderInContext(ctx) })
    }

    pub fn position_at_end(&self, block: BasicBlock) {
        unsafe { LLVMPositionBuilderAtEnd(self.0, block.0) }
    }

    pub fn ret(&self, value: Value) -> Value {
        Value(unsafe { LLVMBuildRet(self.0, value.0) })
    }

    pub fn ret_void(&self) -> Value {
        Value(unsafe { LLVMBuildRetVoid(self.0) })
    }

    pub fn add(&self, lhs: Value, rhs: Value, name: &str) -> Value {
        let c_name = util::cstring(name);
        Value(unsafe { LLVMBuildAdd(self.0, lhs.0, rhs.0, c_name.as_ptr()) })
    }
}

impl Drop for Builder {
    fn drop(&mut self) {
        unsafe { LLVMDisposeBuilder(self.0) }
    }
}
