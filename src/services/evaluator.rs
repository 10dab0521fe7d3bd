use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::CheckError;
use crate::models::{CheckContext, CriteriaModel, ProcessSnapshot, Severity};
use crate::services::message::describe;
use crate::services::process_checker::matches;
use crate::services::status::merge_status;

lazy_static! {
    /// 未配置包含模式时使用的隐式模式
    static ref MATCH_ALL: Regex = Regex::new(".*").expect("static pattern compiles");
}

/// 编译后的包含/排除模式
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub include: Vec<Regex>,
    pub exclude: Option<Regex>,
}

impl CompiledPatterns {
    /// 编译所有模式，任何一个失败都会中止整个检查
    pub fn compile(criteria: &CriteriaModel) -> Result<Self, CheckError> {
        let mut include = criteria
            .cmd_patterns
            .iter()
            .map(|p| Regex::new(p).map_err(|e| CheckError::invalid_pattern(p, e)))
            .collect::<Result<Vec<_>, _>>()?;
        if include.is_empty() {
            include.push(MATCH_ALL.clone());
        }

        let exclude = match criteria.cmd_exclude_pattern.as_deref() {
            Some(p) if !p.is_empty() => {
                Some(Regex::new(p).map_err(|e| CheckError::invalid_pattern(p, e))?)
            }
            _ => None,
        };

        Ok(Self { include, exclude })
    }
}

/// 单个模式的统计结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternOutcome {
    pub pattern: String,
    pub count: i64,
    pub status: Severity,
    #[serde(skip)]
    pub message: String,
}

/// 一次完整检查的结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    pub status: Severity,
    pub message: String,
    pub patterns: Vec<PatternOutcome>,
}

impl CheckOutcome {
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            status: Severity::Unknown,
            message: message.into(),
            patterns: Vec::new(),
        }
    }
}

/// 用一个包含模式扫描全部进程并计数
///
/// 每个模式独立地完整扫描一遍进程列表，不与其它模式共享结果。
pub fn evaluate_pattern(
    include: &Regex,
    exclude: Option<&Regex>,
    criteria: &CriteriaModel,
    processes: &[ProcessSnapshot],
    context: &CheckContext,
) -> PatternOutcome {
    let count = processes
        .iter()
        .filter(|proc| matches(proc, include, exclude, criteria, context))
        .count() as i64;
    let pattern = include.as_str().to_string();

    log::debug!("pattern /{}/ matched {} of {} processes", pattern, count, processes.len());

    PatternOutcome {
        status: merge_status(count, criteria),
        message: describe(count, &pattern, criteria),
        pattern,
        count,
    }
}

/// 执行一次检查：编译模式，逐个模式统计，合并严重级别并拼接描述
pub fn run_check(
    criteria: &CriteriaModel,
    processes: &[ProcessSnapshot],
    context: &CheckContext,
) -> CheckOutcome {
    let compiled = match CompiledPatterns::compile(criteria) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Invalid command pattern /{}/: {}", e.pattern(), e);
            return CheckOutcome::unknown(e.to_string());
        }
    };

    let patterns: Vec<PatternOutcome> = compiled
        .include
        .iter()
        .map(|include| evaluate_pattern(include, compiled.exclude.as_ref(), criteria, processes, context))
        .collect();

    let status = patterns
        .iter()
        .map(|p| p.status)
        .max()
        .unwrap_or(Severity::Ok);
    let message = patterns
        .iter()
        .map(|p| format!("\n{}", p.message))
        .collect::<String>();

    CheckOutcome {
        status,
        message,
        patterns,
    }
}
