#[cfg(feature = "cli")]
use std::sync::Mutex;
#[cfg(feature = "cli")]
use std::time::{Duration, Instant};
#[cfg(feature = "cli")]
use sysinfo::{Pid, RefreshKind, System};

#[cfg(feature = "cli")]
#[derive(Debug, Clone)]
pub struct PhaseStats {
    pub phase: String,
    pub phase_elapsed: Duration,
    pub total_elapsed: Duration,
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
}

#[cfg(feature = "cli")]
struct MonitorState {
    system: System,
    phase_started: Instant,
    peak_memory_mb: u64,
}

/// Per-phase timing and process memory for a single run.
#[cfg(feature = "cli")]
pub struct SystemMonitor {
    state: Mutex<MonitorState>,
    pid: Option<Pid>,
    started: Instant,
    enabled: bool,
}

#[cfg(feature = "cli")]
impl SystemMonitor {
    pub fn new(enabled: bool) -> Self {
        let mut system = System::new_with_specifics(RefreshKind::everything());
        if enabled {
            system.refresh_all();
        }

        // 取不到 PID 時仍記錄耗時，只是沒有記憶體數據
        let pid = sysinfo::get_current_pid().ok();
        let now = Instant::now();

        Self {
            state: Mutex::new(MonitorState {
                system,
                phase_started: now,
                peak_memory_mb: 0,
            }),
            pid,
            started: now,
            enabled,
        }
    }

    /// Closes the current phase and starts timing the next one.
    pub fn finish_phase(&self, phase: &str) -> Option<PhaseStats> {
        if !self.enabled {
            return None;
        }

        let mut state = self.state.lock().ok()?;
        state.system.refresh_all();

        let (cpu_usage, memory_usage_mb) = self
            .pid
            .and_then(|pid| state.system.process(pid))
            .map(|process| (process.cpu_usage(), process.memory() / 1024 / 1024))
            .unwrap_or((0.0, 0));

        state.peak_memory_mb = state.peak_memory_mb.max(memory_usage_mb);

        let now = Instant::now();
        let stats = PhaseStats {
            phase: phase.to_string(),
            phase_elapsed: now.duration_since(state.phase_started),
            total_elapsed: now.duration_since(self.started),
            cpu_usage,
            memory_usage_mb,
            peak_memory_mb: state.peak_memory_mb,
        };
        state.phase_started = now;

        tracing::info!(
            "📊 {} - {:?} (total {:?}), CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
            stats.phase,
            stats.phase_elapsed,
            stats.total_elapsed,
            stats.cpu_usage,
            stats.memory_usage_mb,
            stats.peak_memory_mb
        );

        Some(stats)
    }

    pub fn log_final_stats(&self) {
        if !self.enabled {
            return;
        }
        if let Ok(state) = self.state.lock() {
            tracing::info!(
                "📊 Final Stats - Total Time: {:?}, Peak Memory: {}MB",
                self.started.elapsed(),
                state.peak_memory_mb
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(feature = "cli")]
impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

// 非 CLI 環境的空實現
#[cfg(not(feature = "cli"))]
#[derive(Default)]
pub struct SystemMonitor;

#[cfg(not(feature = "cli"))]
impl SystemMonitor {
    pub fn new(_enabled: bool) -> Self {
        Self
    }

    pub fn finish_phase(&self, _phase: &str) {}

    pub fn log_final_stats(&self) {}

    pub fn is_enabled(&self) -> bool {
        false
    }
}
