use crate::models::{CriteriaModel, Severity};

/// 根据匹配数量和阈值计算单个模式的严重级别
///
/// CRITICAL 优先判断，命中即返回，因此同时满足 warning 与 critical 条件时结果为 CRITICAL。
pub fn merge_status(count: i64, criteria: &CriteriaModel) -> Severity {
    let under = |bound: Option<i64>| bound.map_or(false, |b| count < b);
    let over = |bound: Option<i64>| bound.map_or(false, |b| count > b);

    if under(criteria.critical_under) || over(criteria.critical_over) {
        Severity::Critical
    } else if under(criteria.warning_under) || over(criteria.warning_over) {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_criteria_zero_is_critical() {
        assert_eq!(merge_status(0, &CriteriaModel::default()), Severity::Critical);
    }

    #[test]
    fn test_default_criteria_one_is_ok() {
        assert_eq!(merge_status(1, &CriteriaModel::default()), Severity::Ok);
        assert_eq!(merge_status(50, &CriteriaModel::default()), Severity::Ok);
    }

    #[test]
    fn test_critical_dominates_warning() {
        let criteria = CriteriaModel {
            warning_over: Some(5),
            critical_under: Some(10),
            ..CriteriaModel::default()
        };
        assert_eq!(merge_status(3, &criteria), Severity::Critical);
    }

    #[test]
    fn test_warning_band() {
        let criteria = CriteriaModel {
            warning_under: Some(3),
            critical_under: Some(1),
            warning_over: Some(10),
            critical_over: Some(20),
            ..CriteriaModel::default()
        };
        assert_eq!(merge_status(0, &criteria), Severity::Critical);
        assert_eq!(merge_status(2, &criteria), Severity::Warning);
        assert_eq!(merge_status(3, &criteria), Severity::Ok);
        assert_eq!(merge_status(10, &criteria), Severity::Ok);
        assert_eq!(merge_status(11, &criteria), Severity::Warning);
        assert_eq!(merge_status(20, &criteria), Severity::Warning);
        assert_eq!(merge_status(21, &criteria), Severity::Critical);
    }

    #[test]
    fn test_monotonic_past_critical_over() {
        let criteria = CriteriaModel {
            warning_over: Some(4),
            critical_over: Some(8),
            ..CriteriaModel::default()
        };
        let mut previous = merge_status(1, &criteria);
        for count in 2..40 {
            let current = merge_status(count, &criteria);
            assert!(current >= previous, "count {} went from {} to {}", count, previous, current);
            previous = current;
        }
        assert_eq!(previous, Severity::Critical);
    }

    #[test]
    fn test_disabled_under_bounds() {
        let criteria = CriteriaModel {
            warning_under: None,
            critical_under: None,
            ..CriteriaModel::default()
        };
        assert_eq!(merge_status(0, &criteria), Severity::Ok);
    }

    #[test]
    fn test_critical_over_zero_is_enforced() {
        let criteria = CriteriaModel {
            warning_under: None,
            critical_under: None,
            critical_over: Some(0),
            ..CriteriaModel::default()
        };
        assert_eq!(merge_status(0, &criteria), Severity::Ok);
        assert_eq!(merge_status(1, &criteria), Severity::Critical);
    }
}
