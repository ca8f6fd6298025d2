//! Type construction helpers.

use std::ffi::c_uint;

use llvm_sys::core::{
    LLVMDoubleTypeInContext, LLVMFloatTypeInContext, LLVMFunctionType, LLVMInt16TypeInContext,
    LLVMInt1TypeInContext, LLVMInt32TypeInContext, LLVMInt64TypeInContext, LLVMInt8TypeInContext,
    LLVMPointerTypeInContext, LLVMVoidTypeInContext,
};
use llvm_sys::prelude::LLVMTypeRef;

use crate::context::Context;

/// A first-class LLVM type handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ty(pub LLVMTypeRef);

impl Ty {
    pub fn void(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMVoidTypeInContext(ctx.0) })
    }

    pub fn i1(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMInt1TypeInContext(ctx.0) })
    }

    pub fn i8(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMInt8TypeInContext(ctx.0) })
    }

    pub fn i16(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMInt16TypeInContext(ctx.0) })
    }

    pub fn i32(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMInt32TypeInContext(ctx.0) })
    }

    pub fn i64(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMInt64TypeInContext(ctx.0) })
    }

    pub fn f32(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMFloatTypeInContext(ctx.0) })
    }

    pub fn f64(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMDoubleTypeInContext(ctx.0) })
    }

    /// Opaque pointer in the default address space.
    pub fn pointer(ctx: &Context) -> Ty {
        Ty(unsafe { LLVMPointerTypeInContext(ctx.0, 0) })
    }

    pub fn as_raw(&self) -> LLVMTypeRef {
        self.0
    }
}

/// A function signature type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionTy(pub LLVMTypeRef);

impl FunctionTy {
    pub fn new(ret: Ty, params: &[Ty]) -> FunctionTy {
        let mut params: Vec<LLVMTypeRef> = params.iter().map(|ty| ty.0).collect();
        FunctionTy(unsafe {
            LLVMFunctionType(ret.0, params.as_mut_ptr(), params.len() as c_uint, 0)
        })
    }

    pub fn as_raw(&self) -> LLVMTypeRef {
        self.0
    }
}
