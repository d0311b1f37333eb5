//! Thread spawning for the command-intake task.
//!
//! On ESP-IDF `std::thread` is a pthread on top of a FreeRTOS task, and
//! `esp_pthread_set_cfg()` sets the core, priority and stack of the *next*
//! thread created from the calling thread.  The config→spawn pair must not
//! be interleaved with other thread creation on the same thread.

use std::io;
use std::thread::{self, JoinHandle};

use log::info;

/// Placement and sizing of a spawned task.
#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    /// NUL-terminated, for the FreeRTOS task name.
    pub name: &'static str,
    /// Core 0 (PRO_CPU) or 1 (APP_CPU); ignored on host.
    pub core: i32,
    /// FreeRTOS priority; ignored on host.
    pub priority: u8,
    pub stack_kb: usize,
}

impl TaskSpec {
    fn display_name(&self) -> &'static str {
        self.name.trim_end_matches('\0')
    }
}

/// The console reader: low priority, blocking on UART input.
pub const DISPATCHER_TASK: TaskSpec = TaskSpec {
    name: "dispatcher\0",
    core: 0,
    priority: 5,
    stack_kb: 8,
};

#[cfg(target_os = "espidf")]
pub fn spawn_task<T: Send + 'static>(
    spec: TaskSpec,
    f: impl FnOnce() -> T + Send + 'static,
) -> io::Result<JoinHandle<T>> {
    use esp_idf_svc::sys;

    // SAFETY: the config struct outlives the call, and `name` is a
    // NUL-terminated 'static string.
    let ret = unsafe {
        let mut cfg = sys::esp_create_default_pthread_config();
        cfg.pin_to_core = spec.core;
        cfg.prio = i32::from(spec.priority);
        cfg.stack_size = (spec.stack_kb * 1024) as _;
        cfg.thread_name = spec.name.as_ptr().cast();
        sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != sys::ESP_OK as i32 {
        return Err(io::Error::other(format!("esp_pthread_set_cfg failed: {ret}")));
    }

    info!(
        "Spawning '{}' on core {} (pri={}, stack={}KB)",
        spec.display_name(),
        spec.core,
        spec.priority,
        spec.stack_kb
    );
    thread::Builder::new().name(spec.display_name().into()).spawn(f)
}

/// Host fallback: plain thread, no pinning.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_task<T: Send + 'static>(
    spec: TaskSpec,
    f: impl FnOnce() -> T + Send + 'static,
) -> io::Result<JoinHandle<T>> {
    info!(
        "Spawning '{}' (host, no core pinning, stack={}KB)",
        spec.display_name(),
        spec.stack_kb
    );
    thread::Builder::new()
        .name(spec.display_name().into())
        .stack_size(spec.stack_kb * 1024)
        .spawn(f)
}
