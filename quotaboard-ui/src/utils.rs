use std::collections::BTreeMap;

/// Parse a string of "key=value" pairs separated by newlines or commas
pub fn parse_key_value_pairs(input: &str) -> BTreeMap<String, String> {
    input
        .lines()
        .flat_map(|line| line.split(','))
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                None
            } else {
                Some((key.to_string(), value.trim().to_string()))
            }
        })
        .collect()
}
