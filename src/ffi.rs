//! FFI bindings for habitwatch
//!
//! This module provides C-compatible functions for driving a detection session
//! from a host UI (camera loop, overlay, sound player). All functions use C
//! strings (null-terminated) and return allocated memory that must be freed by
//! the caller using `habitwatch_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::DetectionConfig;
use crate::modes::ModeRegistry;
use crate::report::ReportEncoder;
use crate::schema::FramePayload;
use crate::session::DetectionSession;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Set the last error message
fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

// ============================================================================
// Stateless API
// ============================================================================

/// Evaluate one frame for a habit mode without any session state.
///
/// An unknown mode name never matches.
///
/// # Safety
/// - `mode` and `frame_json` must be valid null-terminated C strings.
/// - `frame_json` is a `{hands, face, mask?}` object.
/// - Returns 1 on contact, 0 on no contact, -1 on error.
/// - On error, call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_evaluate(
    mode: *const c_char,
    frame_json: *const c_char,
    sensitivity: f64,
) -> i32 {
    clear_last_error();

    let mode_str = match cstr_to_string(mode) {
        Some(s) => s,
        None => {
            set_last_error("Invalid mode string pointer");
            return -1;
        }
    };

    let frame_str = match cstr_to_string(frame_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid frame string pointer");
            return -1;
        }
    };

    let frame: FramePayload = match serde_json::from_str(&frame_str) {
        Ok(frame) => frame,
        Err(e) => {
            set_last_error(&e.to_string());
            return -1;
        }
    };

    if let Err(e) = frame.validate() {
        set_last_error(&e.to_string());
        return -1;
    }

    let detected = ModeRegistry::evaluate_named(
        &mode_str,
        &frame.hands,
        &frame.face,
        frame.mask.as_ref(),
        sensitivity,
    );
    i32::from(detected)
}

// ============================================================================
// Stateful Session API
// ============================================================================

/// Opaque handle to a DetectionSession
pub struct HabitSessionHandle {
    session: DetectionSession,
    encoder: ReportEncoder,
}

/// Create a new detection session.
///
/// # Safety
/// - `config_json` must be a valid null-terminated C string, or NULL for defaults.
/// - Returns a pointer to a newly allocated session.
/// - Must be freed with `habitwatch_session_free`.
/// - Returns NULL on error; call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_new(
    config_json: *const c_char,
    now_ms: u64,
) -> *mut HabitSessionHandle {
    clear_last_error();

    let config = if config_json.is_null() {
        DetectionConfig::default()
    } else {
        let json_str = match cstr_to_string(config_json) {
            Some(s) => s,
            None => {
                set_last_error("Invalid config string pointer");
                return ptr::null_mut();
            }
        };
        match DetectionConfig::from_json(&json_str) {
            Ok(config) => config,
            Err(e) => {
                set_last_error(&e.to_string());
                return ptr::null_mut();
            }
        }
    };

    match DetectionSession::new(config, now_ms) {
        Ok(session) => Box::into_raw(Box::new(HabitSessionHandle {
            session,
            encoder: ReportEncoder::new(),
        })),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Free a detection session.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_free(session: *mut HabitSessionHandle) {
    if !session.is_null() {
        drop(Box::from_raw(session));
    }
}

/// Apply one habit.frame.v1 record to a session.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - `record_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `habitwatch_free_string`:
///   the frame outcome JSON for frame records, `null` for tick and control records.
/// - Returns NULL on error; call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_process(
    session: *mut HabitSessionHandle,
    record_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ptr::null_mut();
    }

    let handle = &mut *session;

    let json_str = match cstr_to_string(record_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid record string pointer");
            return ptr::null_mut();
        }
    };

    match handle.session.process_json(&json_str) {
        Ok(Some(outcome)) => string_to_cstr(&outcome),
        Ok(None) => string_to_cstr("null"),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Re-check the pause deadline; call about once a second while no frames arrive.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - Returns 1 if detection resumed, 0 otherwise, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_tick(
    session: *mut HabitSessionHandle,
    now_ms: u64,
) -> i32 {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return -1;
    }

    let handle = &mut *session;
    i32::from(handle.session.tick(now_ms))
}

/// Flip the manual pause.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - Returns 1 if now paused, 0 if now running, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_toggle_pause(
    session: *mut HabitSessionHandle,
    now_ms: u64,
) -> i32 {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return -1;
    }

    let handle = &mut *session;
    i32::from(handle.session.toggle_pause(now_ms))
}

/// Pause for `duration_ms`, resuming automatically afterwards.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - Returns 0 on success, -1 on error.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_pause_for(
    session: *mut HabitSessionHandle,
    duration_ms: u64,
    now_ms: u64,
) -> i32 {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return -1;
    }

    let handle = &mut *session;
    handle.session.pause_for(duration_ms, now_ms);
    0
}

/// Latest session snapshot as JSON.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - Returns a newly allocated string that must be freed with `habitwatch_free_string`.
/// - Returns NULL on error; call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_snapshot(
    session: *const HabitSessionHandle,
) -> *mut c_char {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ptr::null_mut();
    }

    let handle = &*session;

    match serde_json::to_string(handle.session.snapshot().as_ref()) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Session report as JSON.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - Returns a newly allocated string that must be freed with `habitwatch_free_string`.
/// - Returns NULL on error; call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_report(
    session: *const HabitSessionHandle,
    now_ms: u64,
) -> *mut c_char {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ptr::null_mut();
    }

    let handle = &*session;

    match handle.encoder.encode_to_json(&handle.session, now_ms) {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Save session state to JSON.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - Returns a newly allocated string that must be freed with `habitwatch_free_string`.
/// - Returns NULL on error; call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_save_state(
    session: *const HabitSessionHandle,
) -> *mut c_char {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return ptr::null_mut();
    }

    let handle = &*session;

    match handle.session.save_state() {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

/// Load session state from JSON.
///
/// # Safety
/// - `session` must be a valid pointer returned by `habitwatch_session_new`.
/// - `json` must be a valid null-terminated C string.
/// - Returns 0 on success, non-zero on error.
/// - On error, call `habitwatch_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_session_load_state(
    session: *mut HabitSessionHandle,
    json: *const c_char,
    now_ms: u64,
) -> i32 {
    clear_last_error();

    if session.is_null() {
        set_last_error("Null session pointer");
        return -1;
    }

    let handle = &mut *session;

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return -1;
        }
    };

    match handle.session.load_state(&json_str, now_ms) {
        Ok(()) => 0,
        Err(e) => {
            set_last_error(&e.to_string());
            -1
        }
    }
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by habitwatch functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a habitwatch function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next habitwatch call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

// ============================================================================
// Version Information
// ============================================================================

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn habitwatch_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
