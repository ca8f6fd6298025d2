//! Extensions to the LLVM C API, with a thin safe layer on top.
//!
//! `llvm-c` leaves a few useful operations unexposed: lookup-or-insert for
//! functions and globals, per-function verification with a diagnostic
//! buffer, and the version of the linked LLVM build. The [`ffi`] module
//! exports those as C-linkage entry points built on `llvm-sys`, so they can
//! be linked against from any language exactly like the rest of the C API.
//! The remaining modules wrap the same operations (plus the minimum of
//! context/module/builder plumbing needed to use them) in safe Rust.
//!
//! The bridge holds no state and owns no memory beyond the diagnostic
//! buffers it hands to the caller; thread safety is whatever LLVM's own
//! contract says for the handles involved.

#![allow(clippy::missing_safety_doc)]

pub mod analysis;
pub mod builder;
pub mod context;
pub mod ffi;
pub mod module;
pub mod types;
mod util;
pub mod value;

// Public reimports from llvm-sys for callers mixing raw and wrapped calls.
pub use llvm_sys::prelude::{LLVMContextRef, LLVMModuleRef, LLVMTypeRef, LLVMValueRef};

pub use analysis::{FailureAction, Verifier, VerifyError};
pub use builder::Builder;
pub use context::Context;
pub use module::Module;
pub use types::{FunctionTy, Ty};
pub use value::{BasicBlock, Function, GlobalValue, Value, ValueIter};

/// The `(major, minor)` version of the LLVM build found at compile time.
///
/// Baked in by the build script from `llvm-config --version`; can be called
/// without initializing LLVM.
pub fn version() -> (u32, u32) {
    (
        env!("LLVM_EXT_VERSION_MAJOR").parse().unwrap(),
        env!("LLVM_EXT_VERSION_MINOR").parse().unwrap(),
    )
}
