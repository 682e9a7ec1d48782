/// Utility functions
use serde_json::Value;

/// Extract number from JSON value
pub fn num(v: &Value) -> Option<f64> {
    if let Some(x) = v.as_f64() {
        return Some(x);
    }
    if let Some(s) = v.as_str() {
        return s.parse::<f64>().ok();
    }
    None
}

/// Extract a boolean-ish flag from JSON (true boolean, or any non-zero number)
pub fn flag(v: &Value) -> bool {
    if let Some(b) = v.as_bool() {
        return b;
    }
    num(v).map(|x| x != 0.0).unwrap_or(false)
}

/// Pick string value from JSON by trying multiple keys
pub fn s_pick(v: &Value, keys: &[&str]) -> Option<String> {
    for k in keys {
        if let Some(x) = v.get(*k) {
            if let Some(s) = x.as_str() {
                if !s.is_empty() {
                    return Some(s.to_string());
                }
            } else if x.is_number() {
                return Some(x.to_string());
            }
        }
    }
    None
}

/// Numeric array from JSON; null slots become 0.0 so parallel arrays stay aligned
pub fn num_list(v: &Value) -> Vec<f64> {
    v.as_array()
        .map(|arr| arr.iter().map(|x| num(x).unwrap_or(0.0)).collect())
        .unwrap_or_default()
}

/// String array from JSON; non-string slots are skipped
pub fn str_list(v: &Value) -> Vec<String> {
    v.as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|x| x.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_from_float() {
        let json = serde_json::json!(42.5);
        assert_eq!(num(&json), Some(42.5));
    }

    #[test]
    fn test_num_from_string() {
        let json = serde_json::json!("42.5");
        assert_eq!(num(&json), Some(42.5));
    }

    #[test]
    fn test_num_from_invalid() {
        let json = serde_json::json!("invalid");
        assert_eq!(num(&json), None);
    }

    #[test]
    fn test_flag_from_bool() {
        assert!(flag(&serde_json::json!(true)));
        assert!(!flag(&serde_json::json!(false)));
    }

    #[test]
    fn test_flag_from_number() {
        assert!(flag(&serde_json::json!(1)));
        assert!(!flag(&serde_json::json!(0)));
    }

    #[test]
    fn test_flag_from_missing() {
        let json = serde_json::json!({});
        assert!(!flag(&json["is_day"]));
    }

    #[test]
    fn test_s_pick_finds_first() {
        let json = serde_json::json!({"name": "test", "title": "backup"});
        assert_eq!(s_pick(&json, &["name", "title"]), Some("test".to_string()));
    }

    #[test]
    fn test_s_pick_finds_second() {
        let json = serde_json::json!({"title": "backup"});
        assert_eq!(
            s_pick(&json, &["name", "title"]),
            Some("backup".to_string())
        );
    }

    #[test]
    fn test_s_pick_not_found() {
        let json = serde_json::json!({"other": "value"});
        assert_eq!(s_pick(&json, &["name", "title"]), None);
    }

    #[test]
    fn test_s_pick_skips_empty_string() {
        let json = serde_json::json!({"name": "", "title": "backup"});
        assert_eq!(
            s_pick(&json, &["name", "title"]),
            Some("backup".to_string())
        );
    }

    #[test]
    fn test_num_list_keeps_alignment() {
        let json = serde_json::json!([12.5, null, 7]);
        assert_eq!(num_list(&json), vec![12.5, 0.0, 7.0]);
    }

    #[test]
    fn test_num_list_not_an_array() {
        assert_eq!(num_list(&serde_json::json!("nope")), Vec::<f64>::new());
    }

    #[test]
    fn test_str_list() {
        let json = serde_json::json!(["2024-06-01T00:00", "2024-06-01T01:00"]);
        assert_eq!(
            str_list(&json),
            vec!["2024-06-01T00:00".to_string(), "2024-06-01T01:00".to_string()]
        );
    }
}
