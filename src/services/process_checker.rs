use regex::Regex;

use crate::models::{CheckContext, CriteriaModel, ProcessSnapshot};

/// 判断进程是否满足所有过滤条件
///
/// 每个条件在对应字段未设置时直接视为满足。`include` 是当前正在统计的包含模式，
/// `exclude` 只有在排除模式原文非空时才会参与判断。
pub fn matches(
    proc: &ProcessSnapshot,
    include: &Regex,
    exclude: Option<&Regex>,
    criteria: &CriteriaModel,
    context: &CheckContext,
) -> bool {
    (!criteria.has_cmd_patterns() || include.is_match(&proc.command))
        && !is_excluded(proc, exclude, criteria)
        && (criteria.match_self || proc.pid != context.self_pid)
        // 注意：比较的是候选进程的 pid 与检查程序自身的父进程 pid
        && (criteria.match_parent || proc.pid != context.parent_pid)
        && criteria.parent_pid.as_ref().map_or(true, |ppid| &proc.parent_pid == ppid)
        && criteria.file_pid.as_ref().map_or(true, |pid| &proc.pid == pid)
        && criteria.virtual_mem_size.map_or(true, |vsz| proc.vsz <= vsz)
        && criteria.resident_set_size.map_or(true, |rss| proc.rss <= rss)
        && criteria.proportional_cpu.map_or(true, |pcpu| proc.pcpu <= pcpu)
        && criteria.thread_count.map_or(true, |n| proc.thread_count <= n)
        && criteria.state.as_ref().map_or(true, |state| &proc.state == state)
        && criteria.user.as_ref().map_or(true, |user| &proc.user == user)
        && criteria.user_not.as_ref().map_or(true, |user| &proc.user != user)
        && criteria.elapsed_seconds_under.map_or(true, |s| proc.elapsed_seconds < s)
        && criteria.elapsed_seconds_over.map_or(true, |s| proc.elapsed_seconds > s)
        && criteria.cpu_seconds_under.map_or(true, |s| proc.cpu_seconds < s)
        && criteria.cpu_seconds_over.map_or(true, |s| proc.cpu_seconds > s)
}

/// 排除模式需要同时满足“原文非空”和“已编译”两个条件才生效
fn is_excluded(proc: &ProcessSnapshot, exclude: Option<&Regex>, criteria: &CriteriaModel) -> bool {
    match (criteria.cmd_exclude_pattern.as_deref(), exclude) {
        (Some(text), Some(regex)) if !text.is_empty() => regex.is_match(&proc.command),
        _ => false,
    }
}
