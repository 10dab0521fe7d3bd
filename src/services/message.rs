use crate::models::CriteriaModel;

/// 生成单个模式的描述文本
///
/// 以 `Found N matching processes` 开头，随后按固定顺序追加每个已配置的条件。
/// 字段和顺序与历史告警保持一致，方便对比。
pub fn describe(count: i64, pattern: &str, criteria: &CriteriaModel) -> String {
    let mut clauses = vec![format!("Found {} matching processes", count)];

    if criteria.has_cmd_patterns() {
        clauses.push(format!("cmd /{}/", pattern));
    }
    if let Some(state) = &criteria.state {
        clauses.push(format!("state /{}/", state));
    }
    if let Some(user) = &criteria.user {
        clauses.push(format!("user /{}/", user));
    }
    if let Some(user) = &criteria.user_not {
        clauses.push(format!("usernot /{}/", user));
    }
    if let Some(vsz) = criteria.virtual_mem_size {
        clauses.push(format!("vsz < {}", vsz));
    }
    if let Some(rss) = criteria.resident_set_size {
        clauses.push(format!("rss < {}", rss));
    }
    if let Some(pcpu) = criteria.proportional_cpu {
        clauses.push(format!("pcpu < {:.6}", pcpu));
    }
    if let Some(n) = criteria.thread_count {
        clauses.push(format!("thcount < {}", n));
    }
    if let Some(secs) = criteria.elapsed_seconds_under {
        clauses.push(format!("esec < {}", secs));
    }
    if let Some(secs) = criteria.elapsed_seconds_over {
        clauses.push(format!("esec > {}", secs));
    }
    if let Some(secs) = criteria.cpu_seconds_under {
        clauses.push(format!("csec < {}", secs));
    }
    if let Some(secs) = criteria.cpu_seconds_over {
        clauses.push(format!("csec > {}", secs));
    }
    if let Some(ppid) = &criteria.parent_pid {
        clauses.push(format!("ppid {}", ppid));
    }
    if let Some(pid) = &criteria.file_pid {
        clauses.push(format!("pid {}", pid));
    }

    clauses.join("; ")
}
