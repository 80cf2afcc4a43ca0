//! 标识符与字段值排序规则。

/// 舱室号排序：全部可解析为整数时按数值，否则按字典序。
pub fn sort_cabin_ids(ids: &mut [String]) {
    let parsed: Option<Vec<i64>> = ids.iter().map(|id| id.trim().parse::<i64>().ok()).collect();
    match parsed {
        Some(_) => ids.sort_by_key(|id| id.trim().parse::<i64>().unwrap_or_default()),
        None => ids.sort(),
    }
}

/// 字段值排序：全部可解析为数字时按数值，否则按字典序。
pub fn sort_values(values: &mut [String]) {
    let numeric = !values.is_empty() && values.iter().all(|value| parse_number(value).is_some());
    if numeric {
        values.sort_by(|a, b| {
            let a = parse_number(a).unwrap_or_default();
            let b = parse_number(b).unwrap_or_default();
            a.total_cmp(&b)
        });
    } else {
        values.sort();
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|number| number.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn cabin_ids_sort_numerically() {
        let mut ids = owned(&["100", "9", "0128"]);
        sort_cabin_ids(&mut ids);
        assert_eq!(ids, owned(&["9", "100", "0128"]));
    }

    #[test]
    fn mixed_cabin_ids_sort_lexicographically() {
        let mut ids = owned(&["9", "10A", "100"]);
        sort_cabin_ids(&mut ids);
        assert_eq!(ids, owned(&["100", "10A", "9"]));
    }

    #[test]
    fn values_sort_numerically_only_when_all_numeric() {
        let mut values = owned(&["10", "2.5", "3"]);
        sort_values(&mut values);
        assert_eq!(values, owned(&["2.5", "3", "10"]));

        let mut values = owned(&["103B", "102B", "2"]);
        sort_values(&mut values);
        assert_eq!(values, owned(&["102B", "103B", "2"]));
    }
}
