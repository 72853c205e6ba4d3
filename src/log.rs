use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::Local;
use itertools::Itertools;
use lazy_static::lazy_static;
use ringbuffer::RingBufferWrite;
use ringbuffer::{AllocRingBuffer, RingBufferExt};

lazy_static! {
    static ref BUFFER: Mutex<AllocRingBuffer<String>> =
        Mutex::new(AllocRingBuffer::with_capacity(128));
}

static ECHO: AtomicBool = AtomicBool::new(false);

/// Also print every message to stderr as it is written.
pub fn set_echo(enabled: bool) {
    ECHO.store(enabled, Ordering::Relaxed);
}

pub fn echo_enabled() -> bool {
    ECHO.load(Ordering::Relaxed)
}

pub fn write_message(message: &str) {
    let human_readable = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{human_readable}] {message}");

    if echo_enabled() {
        eprintln!("{line}");
    }

    if let Ok(mut buffer) = BUFFER.lock() {
        buffer.push(line)
    }
}

macro_rules! log{
    ($($e:expr),+) => {
        crate::log::write_message(&format!($($e),+))
    }
}

pub(crate) use log;

/// Last `n` messages, oldest first.
pub fn pull_messages(n: usize) -> Vec<String> {
    let mut items = match BUFFER.lock() {
        Ok(buffer) => buffer.iter().rev().take(n).map(Clone::clone).collect_vec(),
        Err(_) => vec![],
    };
    items.reverse();
    items
}
