//! C string plumbing shared by the wrappers.

use std::ffi::{c_char, CStr, CString};

use llvm_sys::core::{LLVMDisposeMessage, LLVMGetValueName2};
use llvm_sys::prelude::LLVMValueRef;

/// Converts to a NUL-terminated buffer for the C API. LLVM symbol names
/// cannot contain interior NULs, so this only fails on caller bugs.
pub(crate) fn cstring(s: &str) -> CString {
    CString::new(s).unwrap()
}

/// Copies an LLVM-owned message into a `String` and releases the original.
pub(crate) unsafe fn adopt_message(message: *mut c_char) -> String {
    if message.is_null() {
        return String::new();
    }
    let text = CStr::from_ptr(message).to_string_lossy().into_owned();
    LLVMDisposeMessage(message);
    text
}

pub(crate) unsafe fn value_name(value: LLVMValueRef) -> String {
    let mut len = 0usize;
    let ptr = LLVMGetValueName2(value, &mut len);
    if ptr.is_null() {
        return String::new();
    }
    let bytes = std::slice::from_raw_parts(ptr as *const u8, len);
    String::from_utf8_lossy(bytes).into_owned()
}
