use std::io;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::arch;
use crate::chip::Chip;
use crate::error::Error;
use crate::peripherals::Peripherals;

// 60 Hz as whole milliseconds.
const FRAME_INTERVAL_MS: [u64; 3] = [17, 17, 16];

// Deadlines further behind than this are dropped instead of replayed.
const MAX_LAG: Duration = Duration::from_millis(50);

/// Fixed-rate deadline scheduler.
pub struct Pacer {
    intervals: Vec<Duration>,
    idx: usize,
    next: Instant,
}

impl Pacer {
    pub fn hz(hz: u32) -> Pacer {
        Pacer {
            intervals: vec![Self::period(hz)],
            idx: 0,
            next: Instant::now(),
        }
    }

    /// The 60 Hz timer/display clock.
    pub fn frames() -> Pacer {
        Pacer {
            intervals: FRAME_INTERVAL_MS.iter().map(|ms| Duration::from_millis(*ms)).collect(),
            idx: 0,
            next: Instant::now(),
        }
    }

    fn period(hz: u32) -> Duration {
        Duration::from_nanos(1_000_000_000 / hz.max(1) as u64)
    }

    pub fn set_hz(&mut self, hz: u32) {
        self.intervals = vec![Self::period(hz)];
        self.idx = 0;
    }

    /// Length of the next period.
    pub fn interval(&self) -> Duration {
        self.intervals[self.idx]
    }

    fn advance(&mut self) {
        self.next += self.interval();
        self.idx = (self.idx + 1) % self.intervals.len();
    }

    /// Sleeps until the current deadline and schedules the next one.
    pub fn wait(&mut self) {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        } else if now - self.next > MAX_LAG {
            self.next = now;
        }
        self.advance();
    }

    /// Non-blocking variant of `wait` for hosts running their own loop.
    pub fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        if now - self.next > MAX_LAG {
            self.next = now;
        }
        self.advance();
        true
    }
}

/// Run flags shared by the CPU thread and the host.
#[derive(Debug)]
pub struct Control {
    running: AtomicBool,
    fast: AtomicBool,
    cpu_hz: AtomicU32,
}

impl Control {
    pub fn new(cpu_hz: u32, fast: bool) -> Self {
        Control {
            running: AtomicBool::new(true),
            fast: AtomicBool::new(fast),
            cpu_hz: AtomicU32::new(cpu_hz.clamp(arch::MIN_CPU_HZ, arch::MAX_CPU_HZ)),
        }
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Unpaced CPU.
    pub fn is_fast(&self) -> bool {
        self.fast.load(Ordering::Relaxed)
    }

    pub fn set_fast(&self, fast: bool) {
        self.fast.store(fast, Ordering::Relaxed);
    }

    pub fn cpu_hz(&self) -> u32 {
        self.cpu_hz.load(Ordering::Relaxed)
    }

    pub fn set_cpu_hz(&self, hz: u32) -> u32 {
        let hz = hz.clamp(arch::MIN_CPU_HZ, arch::MAX_CPU_HZ);
        self.cpu_hz.store(hz, Ordering::Relaxed);
        info!("CPU speed {} Hz", hz);
        hz
    }

    /// +10 %
    pub fn faster(&self) -> u32 {
        let hz = self.cpu_hz();
        self.set_cpu_hz(hz + (hz / 10).max(1))
    }

    /// -10 %
    pub fn slower(&self) -> u32 {
        let hz = self.cpu_hz();
        self.set_cpu_hz(hz - (hz / 10).max(1))
    }
}

impl Default for Control {
    fn default() -> Self {
        Control::new(arch::DEFAULT_CPU_HZ, false)
    }
}

/// What the CPU thread hands back when it stops.
pub struct CpuReport {
    pub chip: Chip,
    /// The fault that halted the CPU, if it did not stop on request.
    pub error: Option<Error>,
}

/// Runs `chip` on its own thread at `control.cpu_hz()` instructions per
/// second until `control.stop()` or a fault.
///
/// Each instruction, including a `LD Vx, K` waiting for a key, costs one
/// period, so the timer side keeps running while the program waits.
pub fn spawn_cpu(mut chip: Chip, control: Arc<Control>) -> io::Result<JoinHandle<CpuReport>> {
    thread::Builder::new()
        .name("cpu".into())
        .spawn(move || {
            let mut hz = control.cpu_hz();
            let mut pacer = Pacer::hz(hz);
            let mut error = None;

            while control.is_running() {
                let want = control.cpu_hz();
                if want != hz {
                    hz = want;
                    pacer.set_hz(hz);
                }

                if control.is_fast() {
                    thread::yield_now();
                } else {
                    pacer.wait();
                }

                if let Err(e) = chip.cycle() {
                    error = Some(e);
                    break;
                }
            }
            debug!("CPU thread done after {} cycles", chip.cycles());
            CpuReport { chip, error }
        })
}

/// Headless 60 Hz timer clock. Returns the number of ticks on stop.
pub fn spawn_timers(peripherals: Arc<Peripherals>, control: Arc<Control>) -> io::Result<JoinHandle<u64>> {
    thread::Builder::new()
        .name("timers".into())
        .spawn(move || {
            let mut pacer = Pacer::frames();
            let mut ticks = 0u64;
            while control.is_running() {
                pacer.wait();
                peripherals.tick_timers();
                ticks += 1;
            }
            ticks
        })
}
