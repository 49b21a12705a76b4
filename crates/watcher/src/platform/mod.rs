//! Platform-specific change notification facilities

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::Subscription;

#[cfg(not(target_os = "linux"))]
compile_error!("watchlog-watcher requires Linux inotify");
