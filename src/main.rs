mod cli;
mod error;
mod models;
mod report;
mod services;

use cli::CommandArgs;
use models::resolve_deprecated;
use services::{run_check, CheckOutcome, ProcessCollector};

fn main() {
    // 日志输出到 stderr，stdout 只保留检查结果
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CommandArgs::parse_or_exit();
    let criteria = resolve_deprecated(args.raw_criteria());
    log::debug!("Effective criteria: {:?}", criteria);

    let outcome = match collect_and_check(&criteria) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("❌ Failed to read process table: {:#}", e);
            CheckOutcome::unknown(e.to_string())
        }
    };

    println!("{}", report::render(&outcome, args.format));
    std::process::exit(outcome.status.exit_code());
}

fn collect_and_check(criteria: &models::CriteriaModel) -> anyhow::Result<CheckOutcome> {
    let collector = ProcessCollector::new();
    let processes = collector.collect()?;
    let context = collector.context()?;
    Ok(run_check(criteria, &processes, &context))
}
