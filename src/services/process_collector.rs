use anyhow::anyhow;
use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessStatus, RefreshKind, System, Users};

use crate::models::{CheckContext, ProcessSnapshot};

/// 基于 sysinfo 的进程表采集器
pub struct ProcessCollector {
    system: System,
    users: Users,
}

impl ProcessCollector {
    /// 创建采集器并刷新一次进程表
    pub fn new() -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::everything()),
        );
        Self {
            system,
            users: Users::new_with_refreshed_list(),
        }
    }

    /// 将当前进程表转换为快照列表
    ///
    /// Linux 上 sysinfo 会把每个线程也列为一项，这里与 ps 一致只保留进程本身。
    pub fn collect(&self) -> anyhow::Result<Vec<ProcessSnapshot>> {
        let snapshots: Vec<ProcessSnapshot> = self
            .system
            .processes()
            .values()
            .filter(|process| process.thread_kind().is_none())
            .map(|process| self.snapshot(process))
            .collect();

        if snapshots.is_empty() {
            return Err(anyhow!("no processes found in the process table"));
        }
        log::debug!("Collected {} processes", snapshots.len());
        Ok(snapshots)
    }

    /// 检查程序自身及其父进程的 pid
    pub fn context(&self) -> anyhow::Result<CheckContext> {
        let self_pid = sysinfo::get_current_pid()
            .map_err(|e| anyhow!("failed to resolve own pid: {}", e))?;
        let parent_pid = self
            .system
            .process(self_pid)
            .and_then(|p| p.parent())
            .map(|p| p.to_string())
            .unwrap_or_default();

        Ok(CheckContext::new(self_pid.to_string(), parent_pid))
    }

    fn snapshot(&self, process: &Process) -> ProcessSnapshot {
        let elapsed_seconds = process.run_time();
        let cpu_seconds = process.accumulated_cpu_time() / 1000;

        ProcessSnapshot {
            command: command_line(process),
            // 与 ps -o user 一致使用有效用户
            user: process
                .effective_user_id()
                .and_then(|uid| self.users.get_user_by_id(uid))
                .map(|user| user.name().to_string())
                .unwrap_or_default(),
            parent_pid: process
                .parent()
                .map(|p: Pid| p.to_string())
                .unwrap_or_else(|| "0".to_string()),
            pid: process.pid().to_string(),
            vsz: process.virtual_memory() / 1024,
            rss: process.memory() / 1024,
            pcpu: lifetime_cpu_percent(process.accumulated_cpu_time(), elapsed_seconds),
            thread_count: thread_count(process.tasks().map(|t| t.len())),
            state: state_code(process.status()).to_string(),
            elapsed_seconds,
            cpu_seconds,
        }
    }
}

impl Default for ProcessCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// 完整命令行；内核线程没有 argv 时与 ps 一样显示为 `[name]`
fn command_line(process: &Process) -> String {
    let cmd = process
        .cmd()
        .iter()
        .map(|s| s.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ");
    if cmd.is_empty() {
        format!("[{}]", process.name().to_string_lossy())
    } else {
        cmd
    }
}

/// 与 `ps -o pcpu` 相同：累计 CPU 时间占运行时间的百分比
fn lifetime_cpu_percent(cpu_millis: u64, elapsed_seconds: u64) -> f64 {
    if elapsed_seconds == 0 {
        return 0.0;
    }
    (cpu_millis as f64 / 1000.0) / elapsed_seconds as f64 * 100.0
}

/// 线程总数，对应 ps 的 nlwp
///
/// sysinfo 的 tasks 不包含主线程，因此需要加一。
fn thread_count(tasks: Option<usize>) -> u64 {
    tasks.map_or(1, |n| n as u64 + 1)
}

/// ps 风格的状态字母
fn state_code(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Run => "R",
        ProcessStatus::Sleep => "S",
        ProcessStatus::UninterruptibleDiskSleep => "D",
        ProcessStatus::Zombie => "Z",
        ProcessStatus::Stop => "T",
        ProcessStatus::Tracing => "t",
        ProcessStatus::Dead => "X",
        ProcessStatus::Idle => "I",
        ProcessStatus::Waking => "W",
        ProcessStatus::Wakekill => "K",
        ProcessStatus::Parked => "P",
        ProcessStatus::LockBlocked => "L",
        _ => "?",
    }
}
