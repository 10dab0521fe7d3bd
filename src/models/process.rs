use serde::Serialize;

/// 一个进程在某一时刻的快照
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSnapshot {
    /// 完整命令行
    pub command: String,
    /// 所属用户名
    pub user: String,
    pub parent_pid: String,
    pub pid: String,
    /// 虚拟内存 (KiB)
    pub vsz: u64,
    /// 常驻内存 (KiB)
    pub rss: u64,
    /// 生命周期内 CPU 使用率 (百分比)
    pub pcpu: f64,
    pub thread_count: u64,
    /// ps 风格的状态字母，例如 Z 表示僵尸进程
    pub state: String,
    pub elapsed_seconds: u64,
    pub cpu_seconds: u64,
}

/// 执行检查的进程自身的身份信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckContext {
    pub self_pid: String,
    pub parent_pid: String,
}

impl CheckContext {
    pub fn new(self_pid: impl Into<String>, parent_pid: impl Into<String>) -> Self {
        Self {
            self_pid: self_pid.into(),
            parent_pid: parent_pid.into(),
        }
    }
}
