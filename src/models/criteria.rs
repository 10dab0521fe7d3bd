use serde::Serialize;

/// 计数下限阈值的默认值
///
/// 默认情况下，某个模式匹配到 0 个进程即为 CRITICAL，
/// 所以本检查可以直接用作“进程必须存在”的探测。
pub const DEFAULT_UNDER: i64 = 1;

/// 命令行原样解析得到的选项
///
/// 0 和空字符串表示“未启用”，废弃的别名仍是独立字段。
/// 通过 [`resolve_deprecated`] 转换为 [`CriteriaModel`]。
#[derive(Debug, Clone, PartialEq)]
pub struct RawCriteria {
    pub warning_over: Option<i64>,
    /// 已废弃，`warning_over` 的别名
    pub warn_over: Option<i64>,
    pub critical_over: Option<i64>,
    pub warning_under: i64,
    /// 已废弃，`warning_under` 的别名
    pub warn_under: i64,
    pub critical_under: i64,
    pub match_self: bool,
    pub match_parent: bool,
    pub cmd_patterns: Vec<String>,
    pub cmd_exclude_pattern: Option<String>,
    pub ppid: String,
    pub file_pid: String,
    pub vsz: u64,
    pub rss: u64,
    pub pcpu: f64,
    pub thread_count: u64,
    pub state: String,
    pub user: String,
    pub user_not: String,
    pub esec_over: u64,
    pub esec_under: u64,
    pub csec_over: u64,
    pub csec_under: u64,
}

impl Default for RawCriteria {
    fn default() -> Self {
        Self {
            warning_over: None,
            warn_over: None,
            critical_over: None,
            warning_under: DEFAULT_UNDER,
            warn_under: DEFAULT_UNDER,
            critical_under: DEFAULT_UNDER,
            match_self: false,
            match_parent: false,
            cmd_patterns: Vec::new(),
            cmd_exclude_pattern: None,
            ppid: String::new(),
            file_pid: String::new(),
            vsz: 0,
            rss: 0,
            pcpu: 0.0,
            thread_count: 0,
            state: String::new(),
            user: String::new(),
            user_not: String::new(),
            esec_over: 0,
            esec_under: 0,
            csec_over: 0,
            csec_under: 0,
        }
    }
}

/// 单次检查使用的过滤条件与阈值（只读）
///
/// 每个字段为 `None` 时对应的条件不生效。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriteriaModel {
    pub warning_over: Option<i64>,
    pub critical_over: Option<i64>,
    pub warning_under: Option<i64>,
    pub critical_under: Option<i64>,

    pub match_self: bool,
    pub match_parent: bool,

    /// 包含模式，为空时匹配所有命令
    pub cmd_patterns: Vec<String>,
    /// 排除模式原文，`Some("")` 会被保留并视为未启用
    pub cmd_exclude_pattern: Option<String>,

    pub parent_pid: Option<String>,
    pub file_pid: Option<String>,
    /// 虚拟内存上限 (KiB)
    pub virtual_mem_size: Option<u64>,
    /// 常驻内存上限 (KiB)
    pub resident_set_size: Option<u64>,
    /// CPU 使用率上限 (百分比)
    pub proportional_cpu: Option<f64>,
    pub thread_count: Option<u64>,
    pub state: Option<String>,
    pub user: Option<String>,
    pub user_not: Option<String>,
    pub elapsed_seconds_over: Option<u64>,
    pub elapsed_seconds_under: Option<u64>,
    pub cpu_seconds_over: Option<u64>,
    pub cpu_seconds_under: Option<u64>,
}

impl Default for CriteriaModel {
    fn default() -> Self {
        resolve_deprecated(RawCriteria::default())
    }
}

impl CriteriaModel {
    /// 是否配置了至少一个包含模式
    pub fn has_cmd_patterns(&self) -> bool {
        !self.cmd_patterns.is_empty()
    }
}

/// 合并废弃别名，并把命令行中“0 / 空字符串表示未启用”的约定转换为显式的 `None`
///
/// 只有当 `warning_under` 仍为默认值时 `warn_under` 才会生效，
/// 因此显式传入 `--warning-under 1` 与不传是无法区分的。
pub fn resolve_deprecated(raw: RawCriteria) -> CriteriaModel {
    let warning_under = if raw.warn_under != DEFAULT_UNDER && raw.warning_under == DEFAULT_UNDER {
        raw.warn_under
    } else {
        raw.warning_under
    };
    let warning_over = raw.warning_over.or(raw.warn_over);

    CriteriaModel {
        warning_over,
        critical_over: raw.critical_over,
        warning_under: non_zero(warning_under),
        critical_under: non_zero(raw.critical_under),
        match_self: raw.match_self,
        match_parent: raw.match_parent,
        cmd_patterns: raw.cmd_patterns,
        cmd_exclude_pattern: raw.cmd_exclude_pattern,
        parent_pid: non_empty(raw.ppid),
        file_pid: non_empty(raw.file_pid),
        virtual_mem_size: non_zero(raw.vsz),
        resident_set_size: non_zero(raw.rss),
        proportional_cpu: (raw.pcpu != 0.0).then_some(raw.pcpu),
        thread_count: non_zero(raw.thread_count),
        state: non_empty(raw.state),
        user: non_empty(raw.user),
        user_not: non_empty(raw.user_not),
        elapsed_seconds_over: non_zero(raw.esec_over),
        elapsed_seconds_under: non_zero(raw.esec_under),
        cpu_seconds_over: non_zero(raw.csec_over),
        cpu_seconds_under: non_zero(raw.csec_under),
    }
}

fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
