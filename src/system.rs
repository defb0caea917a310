//! System-dependent functions, or anything that this library is unable to
//! do without help from the OS.


#[cfg(any(target_os = "macos", target_os = "ios"))]
extern "C" {
    fn gettimeofday(tp: *mut libc::timeval, tzp: *mut libc::timezone) -> libc::c_int;
}


/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub(crate) fn sys_time() -> (i64, i16) {
    use std::ptr::null_mut;

    let mut tv = libc::timeval { tv_sec: 0, tv_usec: 0 };
    let _ = unsafe { gettimeofday(&mut tv, null_mut()) };
    (tv.tv_sec as i64, (tv.tv_usec / 1000) as i16)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(all(unix, not(any(target_os = "macos", target_os = "ios"))))]
pub(crate) fn sys_time() -> (i64, i16) {
    let mut ts = libc::timespec { tv_sec: 0, tv_nsec: 0 };
    let _ = unsafe { libc::clock_gettime(libc::CLOCK_REALTIME, &mut ts) };
    (ts.tv_sec as i64, (ts.tv_nsec / 1_000_000) as i16)
}


#[cfg(windows)] use winapi::shared::minwindef::FILETIME;
#[cfg(windows)] const HECTONANOSECS_IN_SEC: i64 = 10_000_000;
#[cfg(windows)] const HECTONANOSEC_TO_UNIX_EPOCH: i64 = 11_644_473_600 * HECTONANOSECS_IN_SEC;

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(windows)]
pub(crate) fn sys_time() -> (i64, i16) {
    use winapi::um::sysinfoapi::GetSystemTimeAsFileTime;

    let mut ft = FILETIME { dwLowDateTime: 0, dwHighDateTime: 0 };
    unsafe { GetSystemTimeAsFileTime(&mut ft) };

    let hectonanos = ((u64::from(ft.dwHighDateTime) << 32) | u64::from(ft.dwLowDateTime)) as i64;
    let since_epoch = hectonanos - HECTONANOSEC_TO_UNIX_EPOCH;
    (since_epoch.div_euclid(HECTONANOSECS_IN_SEC), (since_epoch.rem_euclid(HECTONANOSECS_IN_SEC) / 10_000) as i16)
}

/// Returns the system’s current time, as a tuple of seconds elapsed since
/// the Unix epoch, and the millisecond of the second.
#[cfg(not(any(unix, windows)))]
pub(crate) fn sys_time() -> (i64, i16) {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d)  => (d.as_secs() as i64, d.subsec_millis() as i16),
        Err(_) => (0, 0),
    }
}


/// Returns the offset from UTC, in seconds, that the system’s local time
/// zone had at the given number of seconds since the Unix epoch. Returns
/// `None` when the platform can’t say.
#[cfg(any(target_os = "linux", target_os = "android", target_os = "macos",
          target_os = "ios", target_os = "freebsd", target_os = "openbsd", target_os = "netbsd"))]
pub(crate) fn sys_utc_offset(seconds_since_epoch: i64) -> Option<i32> {
    let time = seconds_since_epoch as libc::time_t;
    let mut tm: libc::tm = unsafe { std::mem::zeroed() };

    let result = unsafe { libc::localtime_r(&time, &mut tm) };
    if result.is_null() {
        None
    }
    else {
        Some(tm.tm_gmtoff as i32)
    }
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos",
              target_os = "ios", target_os = "freebsd", target_os = "openbsd", target_os = "netbsd")))]
pub(crate) fn sys_utc_offset(_seconds_since_epoch: i64) -> Option<i32> {
    None
}
