//! Safe access to LLVM's structural verifier.
//!
//! The C-linkage entry point ([`crate::ffi::LLVMVerifyFunction2`]) keeps the
//! C API's "nonzero means broken" status convention; the functions here
//! fold that status into `Result` so the polarity cannot be misread from
//! Rust.

use std::ptr;

use llvm_sys::analysis::{LLVMVerifierFailureAction, LLVMVerifyModule};
use thiserror::Error;

use crate::ffi;
use crate::module::Module;
use crate::util;
use crate::value::Function;

/// What the verifier does when it finds a broken body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureAction {
    /// Print the diagnostics to stderr and abort the process.
    AbortProcess,
    /// Print the diagnostics to stderr and return the status.
    PrintMessage,
    /// Return the status without printing anything.
    ReturnStatus,
}

impl From<FailureAction> for LLVMVerifierFailureAction {
    fn from(action: FailureAction) -> LLVMVerifierFailureAction {
        match action {
            FailureAction::AbortProcess => LLVMVerifierFailureAction::LLVMAbortProcessAction,
            FailureAction::PrintMessage => LLVMVerifierFailureAction::LLVMPrintMessageAction,
            FailureAction::ReturnStatus => LLVMVerifierFailureAction::LLVMReturnStatusAction,
        }
    }
}

/// A verification violation, with the verifier's diagnostic text.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("broken function `{name}`: {message}")]
    BrokenFunction { name: String, message: String },

    #[error("broken module: {message}")]
    BrokenModule { message: String },
}

/// IR verifier entry points.
pub struct Verifier;

impl Verifier {
    /// Verifies a single function body, returning the diagnostic text when
    /// it is broken.
    pub fn verify_func(func: &Function) -> Result<(), VerifyError> {
        let mut message = ptr::null_mut();
        let broken = unsafe {
            ffi::LLVMVerifyFunction2(
                func.as_raw(),
                LLVMVerifierFailureAction::LLVMReturnStatusAction,
                &mut message,
            )
        } != 0;
        let message = unsafe { util::adopt_message(message) };

        if broken {
            Err(VerifyError::BrokenFunction { name: func.name(), message })
        } else {
            Ok(())
        }
    }

    /// Verifies a whole module, returning the diagnostic text when any of
    /// its bodies is broken.
    pub fn verify_module(module: &Module) -> Result<(), VerifyError> {
        let mut message = ptr::null_mut();
        let broken = unsafe {
            LLVMVerifyModule(
                module.as_raw(),
                LLVMVerifierFailureAction::LLVMReturnStatusAction,
                &mut message,
            )
        } != 0;
        let message = unsafe { util::adopt_message(message) };

        if broken {
            Err(VerifyError::BrokenModule { message })
        } else {
            Ok(())
        }
    }

    /// Runs the verifier with the caller's choice of failure behavior,
    /// returning `true` when the body is broken. With
    /// [`FailureAction::AbortProcess`] a broken body never returns.
    pub fn func_is_broken(func: &Function, action: FailureAction) -> bool {
        unsafe { ffi::LLVMVerifyFunction2(func.as_raw(), action.into(), ptr::null_mut()) != 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_actions_map_onto_the_c_enum() {
        assert_eq!(
            LLVMVerifierFailureAction::from(FailureAction::AbortProcess),
            LLVMVerifierFailureAction::LLVMAbortProcessAction
        );
        assert_eq!(
            LLVMVerifierFailureAction::from(FailureAction::PrintMessage),
            LLVMVerifierFailureAction::LLVMPrintMessageAction
        );
        assert_eq!(
            LLVMVerifierFailureAction::from(FailureAction::ReturnStatus),
            LLVMVerifierFailureAction::LLVMReturnStatusAction
        );
    }
}
