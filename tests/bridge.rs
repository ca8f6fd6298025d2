//! End-to-end checks for the C API extensions and the safe layer on top.

use std::env;
use std::ffi::CStr;
use std::process::Command;
use std::ptr;

use llvm_ext::ffi::{LLVMVerifyFunction2, LLVMVersionMajor, LLVMVersionMinor};
use llvm_ext::{Context, FailureAction, FunctionTy, Module, Ty, Verifier, VerifyError};
use llvm_sys::analysis::LLVMVerifierFailureAction;
use llvm_sys::core::LLVMDisposeMessage;

#[test]
fn get_or_insert_function_is_idempotent() {
    let ctx = Context::new();
    let module = ctx.create_module("bridge");
    let sig = FunctionTy::new(Ty::void(&ctx), &[Ty::i32(&ctx)]);

    assert!(module.get_func("foo").is_none());
    let first = module.get_or_insert_function("foo", &sig);
    let second = module.get_or_insert_function("foo", &sig);
    assert_eq!(first, second);

    // Once the name exists the requested type is ignored.
    let other_sig = FunctionTy::new(Ty::i64(&ctx), &[]);
    let third = module.get_or_insert_function("foo", &other_sig);
    assert_eq!(first, third);

    let declared: Vec<_> = module.functions().filter(|f| f.name() == "foo").collect();
    assert_eq!(declared.len(), 1);
    assert!(first.is_declaration());
}

#[test]
fn get_or_insert_global_is_idempotent() {
    let ctx = Context::new();
    let module = ctx.create_module("bridge");

    assert!(module.get_global("counter").is_none());
    let first = module.get_or_insert_global("counter", &Ty::i64(&ctx));
    let second = module.get_or_insert_global("counter", &Ty::i64(&ctx));
    assert_eq!(first, second);

    let third = module.get_or_insert_global("counter", &Ty::f64(&ctx));
    assert_eq!(first, third);

    let declared: Vec<_> = module
        .global_values()
        .filter(|g| g.name() == "counter")
        .collect();
    assert_eq!(declared.len(), 1);
}

#[test]
fn version_constants_are_stable() {
    let (major, minor) = llvm_ext::version();
    assert!(major >= 18);
    assert_eq!((major, minor), llvm_ext::version());
    assert_eq!(major, LLVMVersionMajor());
    assert_eq!(minor, LLVMVersionMinor());
}

/// Builds `define i64 @sum(i64 %a, i64 %b)` whose body adds the two
/// parameters and returns the result.
fn build_sum(ctx: &Context, module: &Module) -> llvm_ext::Function {
    let builder = ctx.create_builder();
    let sig = FunctionTy::new(Ty::i64(ctx), &[Ty::i64(ctx), Ty::i64(ctx)]);
    let func = module.add_func("sum", &sig);
    builder.position_at_end(func.append("entry"));
    let total = builder.add(func.param(0), func.param(1), "total");
    builder.ret(total);
    func
}

/// Builds a function whose single block has no terminator, which the
/// verifier rejects.
fn build_broken(ctx: &Context, module: &Module) -> llvm_ext::Function {
    let sig = FunctionTy::new(Ty::void(ctx), &[]);
    let func = module.add_func("bad", &sig);
    func.append("entry");
    func
}

#[test]
fn verify_accepts_well_formed_function() {
    let ctx = Context::new();
    let module = ctx.create_module("ok");
    let func = build_sum(&ctx, &module);

    func.verify().expect("sum should verify");
    module.verify().expect("module should verify");

    // Raw entry point: 0 means well formed, the requested buffer is empty.
    unsafe {
        let mut message = ptr::null_mut();
        let broken = LLVMVerifyFunction2(
            func.as_raw(),
            LLVMVerifierFailureAction::LLVMReturnStatusAction,
            &mut message,
        );
        assert_eq!(broken, 0);
        assert!(!message.is_null());
        let text = CStr::from_ptr(message).to_string_lossy().into_owned();
        LLVMDisposeMessage(message);
        assert!(text.is_empty());
    }
}

#[test]
fn verify_flags_missing_terminator() {
    let ctx = Context::new();
    let module = ctx.create_module("broken");
    let func = build_broken(&ctx, &module);

    match func.verify() {
        Err(VerifyError::BrokenFunction { name, message }) => {
            assert_eq!(name, "bad");
            assert!(message.contains("terminator"), "unexpected text: {message}");
        }
        other => panic!("expected a broken-function error, got {other:?}"),
    }
    assert!(module.verify().is_err());

    unsafe {
        let mut message = ptr::null_mut();
        let broken = LLVMVerifyFunction2(
            func.as_raw(),
            LLVMVerifierFailureAction::LLVMReturnStatusAction,
            &mut message,
        );
        assert_eq!(broken, 1);
        let text = CStr::from_ptr(message).to_string_lossy().into_owned();
        LLVMDisposeMessage(message);
        assert!(!text.is_empty());
    }
}

/// Re-runs this test binary against a single `#[ignore]`d test so its exit
/// status and stderr can be inspected from the outside.
fn run_ignored_child(name: &str) -> std::process::Output {
    let exe = env::current_exe().expect("test binary path");
    Command::new(exe)
        .args(["--exact", name, "--ignored", "--nocapture"])
        .output()
        .expect("spawn child test process")
}

#[test]
fn verify_abort_action_kills_the_process() {
    let output = run_ignored_child("abort_child");
    assert!(
        !output.status.success(),
        "abort-process action on a broken function should not return"
    );
}

#[test]
fn requesting_a_buffer_duplicates_diagnostics_to_stderr() {
    let output = run_ignored_child("stderr_child_buffer_return_status");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("terminator"),
        "expected verifier text on stderr: {stderr}"
    );
}

#[test]
fn return_status_without_buffer_stays_silent() {
    let output = run_ignored_child("stderr_child_silent_return_status");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("terminator"),
        "unexpected verifier text on stderr: {stderr}"
    );
}

#[test]
fn print_message_without_buffer_prints_to_stderr() {
    let output = run_ignored_child("stderr_child_print_message");
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("terminator"),
        "expected verifier text on stderr: {stderr}"
    );
}

/// Child of `requesting_a_buffer_duplicates_diagnostics_to_stderr`: a broken
/// function verified with a message buffer under `ReturnStatus` still gets
/// its diagnostics copied to stderr.
#[test]
#[ignore]
fn stderr_child_buffer_return_status() {
    let ctx = Context::new();
    let module = ctx.create_module("stderr");
    let func = build_broken(&ctx, &module);

    unsafe {
        let mut message = ptr::null_mut();
        let broken = LLVMVerifyFunction2(
            func.as_raw(),
            LLVMVerifierFailureAction::LLVMReturnStatusAction,
            &mut message,
        );
        assert_eq!(broken, 1);
        LLVMDisposeMessage(message);
    }
}

/// Child of `return_status_without_buffer_stays_silent`: without a buffer,
/// `ReturnStatus` reports the status and prints nothing.
#[test]
#[ignore]
fn stderr_child_silent_return_status() {
    let ctx = Context::new();
    let module = ctx.create_module("stderr");
    let func = build_broken(&ctx, &module);

    assert!(Verifier::func_is_broken(&func, FailureAction::ReturnStatus));
}

/// Child of `print_message_without_buffer_prints_to_stderr`.
#[test]
#[ignore]
fn stderr_child_print_message() {
    let ctx = Context::new();
    let module = ctx.create_module("stderr");
    let func = build_broken(&ctx, &module);

    assert!(Verifier::func_is_broken(&func, FailureAction::PrintMessage));
}

/// Only meaningful when spawned by `verify_abort_action_kills_the_process`;
/// exits 0 if the abort action ever returns.
#[test]
#[ignore]
fn abort_child() {
    let ctx = Context::new();
    let module = ctx.create_module("abort");
    let func = build_broken(&ctx, &module);

    Verifier::func_is_broken(&func, FailureAction::AbortProcess);
    std::process::exit(0);
}
