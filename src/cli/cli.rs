use clap::{Parser, ValueEnum};

use crate::models::RawCriteria;

/// 参数错误时的退出码，与历史插件保持一致
///
/// clap 默认的 2 会被监控系统当作 CRITICAL。
pub const USAGE_ERROR_EXIT_CODE: i32 = 1;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// check-procs - 按条件统计进程数量并给出检查结果
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Trigger a warning if over a number
    #[arg(short = 'w', long, value_name = "N", allow_negative_numbers = true)]
    pub warning_over: Option<i64>,

    /// (DEPRECATED) Trigger a warning if over a number
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub warn_over: Option<i64>,

    /// Trigger a critical if over a number
    #[arg(short = 'c', long, value_name = "N", allow_negative_numbers = true)]
    pub critical_over: Option<i64>,

    /// Trigger a warning if under a number
    #[arg(short = 'W', long, value_name = "N", default_value_t = 1, allow_negative_numbers = true)]
    pub warning_under: i64,

    /// (DEPRECATED) Trigger a warning if under a number
    #[arg(long, value_name = "N", default_value_t = 1, allow_negative_numbers = true)]
    pub warn_under: i64,

    /// Trigger a critical if under a number
    #[arg(short = 'C', long, value_name = "N", default_value_t = 1, allow_negative_numbers = true)]
    pub critical_under: i64,

    /// Match itself
    #[arg(short = 'm', long)]
    pub match_self: bool,

    /// Match parent
    #[arg(short = 'M', long)]
    pub match_parent: bool,

    /// Match a command against these patterns
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Don't match against a pattern to prevent false positives
    #[arg(short = 'x', long, value_name = "PATTERN")]
    pub exclude_pattern: Option<String>,

    /// Check against a specific PPID
    #[arg(long, value_name = "PPID", default_value = "")]
    pub ppid: String,

    /// Check against a specific PID
    #[arg(short = 'f', long, value_name = "PID", default_value = "")]
    pub file_pid: String,

    /// Trigger on a Virtual Memory size is bigger than this (KiB)
    #[arg(short = 'z', long, value_name = "VSZ", default_value_t = 0)]
    pub virtual_memory_size: u64,

    /// Trigger on a Resident Set size is bigger than this (KiB)
    #[arg(short = 'r', long, value_name = "RSS", default_value_t = 0)]
    pub resident_set_size: u64,

    /// Trigger on a CPU percentage bigger than this
    #[arg(short = 'P', long = "proportional-set-size", value_name = "PCPU", default_value_t = 0.0)]
    pub pcpu: f64,

    /// Trigger on a Thread Count is bigger than this
    #[arg(short = 'T', long, value_name = "THCOUNT", default_value_t = 0)]
    pub thread_count: u64,

    /// Trigger on a specific state, example: Z for zombie
    #[arg(short = 's', long, value_name = "STATE", default_value = "")]
    pub state: String,

    /// Trigger on a specific user
    #[arg(short = 'u', long, value_name = "USER", default_value = "")]
    pub user: String,

    /// Trigger if not owned a specific user
    #[arg(short = 'U', long, value_name = "USER", default_value = "")]
    pub user_not: String,

    /// Match processes that older that this, in SECONDS
    #[arg(short = 'e', long, value_name = "SECONDS", default_value_t = 0)]
    pub esec_over: u64,

    /// Match process that are younger than this, in SECONDS
    #[arg(short = 'E', long, value_name = "SECONDS", default_value_t = 0)]
    pub esec_under: u64,

    /// Match processes cpu time that is older than this, in SECONDS
    #[arg(short = 'i', long, value_name = "SECONDS", default_value_t = 0)]
    pub cpu_over: u64,

    /// Match processes cpu time that is younger than this, in SECONDS
    #[arg(short = 'I', long, value_name = "SECONDS", default_value_t = 0)]
    pub cpu_under: u64,

    /// 输出格式
    #[arg(long, value_enum, env = "CHECK_PROCS_FORMAT", default_value = "text")]
    pub format: OutputFormat,
}

impl CommandArgs {
    /// 解析命令行；参数错误以 [`USAGE_ERROR_EXIT_CODE`] 退出，help / version 正常输出
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|e| {
            let code = usage_exit_code(&e);
            let _ = e.print();
            std::process::exit(code)
        })
    }

    /// 转换为未经处理的检查条件，废弃别名由 `resolve_deprecated` 统一处理
    pub fn raw_criteria(&self) -> RawCriteria {
        RawCriteria {
            warning_over: self.warning_over,
            warn_over: self.warn_over,
            critical_over: self.critical_over,
            warning_under: self.warning_under,
            warn_under: self.warn_under,
            critical_under: self.critical_under,
            match_self: self.match_self,
            match_parent: self.match_parent,
            cmd_patterns: self.patterns.clone(),
            cmd_exclude_pattern: self.exclude_pattern.clone(),
            ppid: self.ppid.clone(),
            file_pid: self.file_pid.clone(),
            vsz: self.virtual_memory_size,
            rss: self.resident_set_size,
            pcpu: self.pcpu,
            thread_count: self.thread_count,
            state: self.state.clone(),
            user: self.user.clone(),
            user_not: self.user_not.clone(),
            esec_over: self.esec_over,
            esec_under: self.esec_under,
            csec_over: self.cpu_over,
            csec_under: self.cpu_under,
        }
    }
}

/// help 和 version 也以错误形式返回，它们输出到 stdout 并以 0 退出
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        USAGE_ERROR_EXIT_CODE
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resolve_deprecated;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_raw_defaults() {
        let args = CommandArgs::parse_from(["check-procs"]);
        assert_eq!(args.raw_criteria(), RawCriteria::default());
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_short_flags() {
        let args = CommandArgs::parse_from([
            "check-procs", "-p", "nginx", "-p", "php-fpm", "-x", "worker", "-w", "10", "-c", "20",
            "-W", "2", "-C", "0", "-u", "www-data", "-s", "S", "-e", "60", "-I", "5",
        ]);
        let raw = args.raw_criteria();
        assert_eq!(raw.cmd_patterns, vec!["nginx", "php-fpm"]);
        assert_eq!(raw.cmd_exclude_pattern.as_deref(), Some("worker"));
        assert_eq!(raw.warning_over, Some(10));
        assert_eq!(raw.critical_over, Some(20));
        assert_eq!(raw.warning_under, 2);
        assert_eq!(raw.critical_under, 0);
        assert_eq!(raw.user, "www-data");
        assert_eq!(raw.state, "S");
        assert_eq!(raw.esec_over, 60);
        assert_eq!(raw.csec_under, 5);

        let criteria = resolve_deprecated(raw);
        assert_eq!(criteria.critical_under, None);
        assert_eq!(criteria.warning_under, Some(2));
    }

    #[test]
    fn test_deprecated_long_flags() {
        let args = CommandArgs::parse_from(["check-procs", "--warn-under", "4", "--warn-over", "9"]);
        let criteria = resolve_deprecated(args.raw_criteria());
        assert_eq!(criteria.warning_under, Some(4));
        assert_eq!(criteria.warning_over, Some(9));
    }

    #[test]
    fn test_empty_exclude_pattern_kept() {
        let args = CommandArgs::parse_from(["check-procs", "--exclude-pattern", ""]);
        assert_eq!(args.raw_criteria().cmd_exclude_pattern.as_deref(), Some(""));
    }

    #[test]
    fn test_bad_arguments_exit_with_one() {
        let err = CommandArgs::try_parse_from(["check-procs", "--no-such-flag"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);

        let err = CommandArgs::try_parse_from(["check-procs", "-w", "many"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 1);
    }

    #[test]
    fn test_help_and_version_exit_with_zero() {
        let err = CommandArgs::try_parse_from(["check-procs", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 0);

        let err = CommandArgs::try_parse_from(["check-procs", "--version"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), 0);
    }

    #[test]
    fn test_json_format() {
        let args = CommandArgs::parse_from(["check-procs", "--format", "json", "-P", "12.5"]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.raw_criteria().pcpu, 12.5);
    }
}
