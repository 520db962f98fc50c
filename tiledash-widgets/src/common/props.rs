// tiledash-widgets/src/common/props.rs

use serde_json::Value;
use tiledash_core::Props;

pub fn prop_str(props: &Props, key: &str, default: &str) -> String {
    props
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

pub fn prop_f64(props: &Props, key: &str, default: f64) -> f64 {
    props.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Labelled values given as `[["Jan", 1200.0], ...]`
pub fn prop_series(props: &Props, key: &str) -> Option<Vec<(String, f64)>> {
    let items = props.get(key)?.as_array()?;
    items
        .iter()
        .map(|item| {
            let pair = item.as_array()?;
            let label = pair.first()?.as_str()?.to_string();
            let value = pair.get(1)?.as_f64()?;
            Some((label, value))
        })
        .collect()
}

/// Rows of string cells given as `[["a", "b"], ...]`; non-string cells are
/// rendered with their JSON representation
pub fn prop_rows(props: &Props, key: &str) -> Option<Vec<Vec<String>>> {
    let rows = props.get(key)?.as_array()?;
    rows.iter()
        .map(|row| {
            row.as_array().map(|cells| {
                cells
                    .iter()
                    .map(|cell| match cell {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        match value {
            Value::Object(map) => map,
            _ => Props::new(),
        }
    }

    #[test]
    fn test_scalars_with_fallback() {
        let p = props(json!({"title": "Savings", "value": 1250.5, "delta": "oops"}));
        assert_eq!(prop_str(&p, "title", "x"), "Savings");
        assert_eq!(prop_str(&p, "missing", "x"), "x");
        assert_eq!(prop_f64(&p, "value", 0.0), 1250.5);
        assert_eq!(prop_f64(&p, "delta", 1.0), 1.0);
    }

    #[test]
    fn test_series() {
        let p = props(json!({"points": [["Jan", 1], ["Feb", 2.5]], "bad": [["Jan"]]}));
        assert_eq!(
            prop_series(&p, "points"),
            Some(vec![("Jan".to_string(), 1.0), ("Feb".to_string(), 2.5)])
        );
        assert_eq!(prop_series(&p, "bad"), None);
        assert_eq!(prop_series(&p, "missing"), None);
    }

    #[test]
    fn test_rows() {
        let p = props(json!({"rows": [["Rent", -950.0], ["Salary", "3,100.00"]]}));
        assert_eq!(
            prop_rows(&p, "rows"),
            Some(vec![
                vec!["Rent".to_string(), "-950.0".to_string()],
                vec!["Salary".to_string(), "3,100.00".to_string()],
            ])
        );
    }
}
