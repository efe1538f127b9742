//! Table view state and its URL representation
//!
//! Under a reflection key `k` the state is written as `k.p` (1-based page),
//! `k.perPage`, `k.sort` (column id, `-` prefix for descending) and `k.q`
//! (text filter). Values equal to the defaults are left out of the URL.

use std::cmp::Ordering;

use crate::columns::ColumnDescriptor;

pub const DEFAULT_ROWS_PER_PAGE: usize = 15;
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [15, 25, 50];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub column: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    /// Zero-based page index
    pub page: usize,
    pub rows_per_page: usize,
    pub sort: Option<SortOrder>,
    pub filter: String,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            sort: None,
            filter: String::new(),
        }
    }
}

/// One page of rows after filtering and sorting
#[derive(Debug)]
pub struct TablePage<'a, T> {
    pub rows: Vec<&'a T>,
    /// Page actually shown, clamped into range
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the filter, across all pages
    pub total: usize,
}

fn param(key: &str, name: &str) -> String {
    if key.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", key, name)
    }
}

impl TableState {
    pub fn from_query<'a, I>(key: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let (p, per_page, sort, q) = (
            param(key, "p"),
            param(key, "perPage"),
            param(key, "sort"),
            param(key, "q"),
        );
        let mut state = Self::default();

        for (name, value) in pairs {
            if name == p {
                if let Ok(page) = value.parse::<usize>() {
                    state.page = page.saturating_sub(1);
                }
            } else if name == per_page {
                match value.parse::<usize>() {
                    Ok(n) if n > 0 => state.rows_per_page = n,
                    _ => {}
                }
            } else if name == sort {
                state.sort = parse_sort(value);
            } else if name == q {
                state.filter = value.to_string();
            }
        }

        state
    }

    /// Query parameters for this state; defaults are omitted
    pub fn to_query(&self, key: &str) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if self.page > 0 {
            pairs.push((param(key, "p"), (self.page + 1).to_string()));
        }
        if self.rows_per_page != DEFAULT_ROWS_PER_PAGE {
            pairs.push((param(key, "perPage"), self.rows_per_page.to_string()));
        }
        if let Some(sort) = &self.sort {
            let value = match sort.direction {
                SortDirection::Ascending => sort.column.clone(),
                SortDirection::Descending => format!("-{}", sort.column),
            };
            pairs.push((param(key, "sort"), value));
        }
        if !self.filter.is_empty() {
            pairs.push((param(key, "q"), self.filter.clone()));
        }

        pairs
    }

    /// Replace this table's parameters in an existing query, keeping the rest
    pub fn merge_into_query(&self, key: &str, existing: &[(String, String)]) -> Vec<(String, String)> {
        let owned = [
            param(key, "p"),
            param(key, "perPage"),
            param(key, "sort"),
            param(key, "q"),
        ];

        existing
            .iter()
            .filter(|(name, _)| !owned.contains(name))
            .cloned()
            .chain(self.to_query(key))
            .collect()
    }

    /// Cycle the sort on `column`: ascending, then descending, then ascending
    pub fn toggle_sort(&mut self, column: &str) {
        let direction = match &self.sort {
            Some(sort) if sort.column == column && sort.direction == SortDirection::Ascending => {
                SortDirection::Descending
            }
            _ => SortDirection::Ascending,
        };
        self.sort = Some(SortOrder {
            column: column.to_string(),
            direction,
        });
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
        self.page = 0;
    }

    pub fn set_rows_per_page(&mut self, rows: usize) {
        if rows > 0 {
            self.rows_per_page = rows;
            self.page = 0;
        }
    }

    /// Filter, sort and paginate `items` using the columns' scalar values
    ///
    /// Cells whose value fails compare as empty strings.
    pub fn apply<'a, T>(&self, columns: &[ColumnDescriptor<T>], items: &'a [T]) -> TablePage<'a, T> {
        let needle = self.filter.trim().to_lowercase();
        let mut rows: Vec<&'a T> = items
            .iter()
            .filter(|item| {
                needle.is_empty()
                    || columns.iter().any(|column| {
                        column
                            .value(item)
                            .map(|v| v.to_lowercase().contains(&needle))
                            .unwrap_or(false)
                    })
            })
            .collect();

        if let Some(sort) = &self.sort {
            if let Some(column) = columns.iter().find(|c| c.id == sort.column) {
                let mut keyed: Vec<(SortKey, &'a T)> = rows
                    .into_iter()
                    .map(|item| (SortKey::new(column.value(item).unwrap_or_default()), item))
                    .collect();
                keyed.sort_by(|(a, _), (b, _)| match sort.direction {
                    SortDirection::Ascending => a.compare(b),
                    SortDirection::Descending => b.compare(a),
                });
                rows = keyed.into_iter().map(|(_, item)| item).collect();
            }
        }

        let total = rows.len();
        let rows_per_page = self.rows_per_page.max(1);
        let page_count = total.div_ceil(rows_per_page).max(1);
        let page = self.page.min(page_count - 1);

        let rows = rows
            .into_iter()
            .skip(page * rows_per_page)
            .take(rows_per_page)
            .collect();

        TablePage {
            rows,
            page,
            page_count,
            total,
        }
    }
}

fn parse_sort(value: &str) -> Option<SortOrder> {
    let (column, direction) = match value.strip_prefix('-') {
        Some(column) => (column, SortDirection::Descending),
        None => (value, SortDirection::Ascending),
    };
    if column.is_empty() {
        return None;
    }
    Some(SortOrder {
        column: column.to_string(),
        direction,
    })
}

/// Numeric-aware sort key so `"9"` sorts before `"10"`
///
/// Finite numbers come first in numeric order, everything else follows in
/// lexical order. Mixing the two within one comparison would not be a total
/// order.
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    fn new(value: String) -> Self {
        match value.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(value),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
        }
    }
}

/// Encode pairs as a query string without the leading `?`
pub fn encode_query(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Decode a query string, with or without the leading `?`
///
/// Pairs that are not valid UTF-8 after decoding are dropped.
pub fn decode_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let k = urlencoding::decode(&k.replace('+', " ")).ok()?.into_owned();
            let v = urlencoding::decode(&v.replace('+', " ")).ok()?.into_owned();
            Some((k, v))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::CellError;

    struct Item {
        name: &'static str,
        size: &'static str,
    }

    fn columns() -> Vec<ColumnDescriptor<Item>> {
        vec![
            ColumnDescriptor::text("name", "Name", |i: &Item| Ok(i.name.to_string())),
            ColumnDescriptor::text("size", "Size", |i: &Item| Ok(i.size.to_string())),
        ]
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "delta", size: "10" },
            Item { name: "alpha", size: "9" },
            Item { name: "charlie", size: "100" },
            Item { name: "bravo", size: "9" },
        ]
    }

    fn names<'a>(page: &TablePage<'a, Item>) -> Vec<&'static str> {
        page.rows.iter().map(|i| i.name).collect()
    }

    #[test]
    fn test_default_state_has_empty_query() {
        assert!(TableState::default().to_query("resourcequotas").is_empty());
    }

    #[test]
    fn test_query_round_trip_under_key() {
        let mut state = TableState::default();
        state.page = 2;
        state.set_rows_per_page(25);
        state.page = 2;
        state.toggle_sort("age");
        state.toggle_sort("age");
        state.filter = "team a".to_string();

        let query = state.to_query("resourcequotas");
        assert!(query.contains(&("resourcequotas.p".to_string(), "3".to_string())));
        assert!(query.contains(&("resourcequotas.sort".to_string(), "-age".to_string())));

        let parsed = TableState::from_query(
            "resourcequotas",
            query.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_from_query_ignores_other_keys_and_garbage() {
        let state = TableState::from_query(
            "quotas",
            vec![("pods.p", "4"), ("quotas.perPage", "0"), ("quotas.p", "x"), ("quotas.sort", "-")],
        );
        assert_eq!(state, TableState::default());
    }

    #[test]
    fn test_empty_key_uses_bare_names() {
        let state = TableState::from_query("", vec![("p", "2"), ("q", "cpu")]);
        assert_eq!(state.page, 1);
        assert_eq!(state.filter, "cpu");
    }

    #[test]
    fn test_merge_keeps_foreign_params() {
        let mut state = TableState::default();
        state.set_filter("prod");
        let existing = vec![
            ("pods.p".to_string(), "2".to_string()),
            ("quotas.q".to_string(), "old".to_string()),
        ];

        let merged = state.merge_into_query("quotas", &existing);
        assert_eq!(
            merged,
            vec![
                ("pods.p".to_string(), "2".to_string()),
                ("quotas.q".to_string(), "prod".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_is_numeric_aware_and_stable() {
        let items = items();
        let mut state = TableState::default();
        state.toggle_sort("size");

        let page = state.apply(&columns(), &items);
        assert_eq!(names(&page), vec!["alpha", "bravo", "delta", "charlie"]);

        state.toggle_sort("size");
        let page = state.apply(&columns(), &items);
        assert_eq!(names(&page), vec!["charlie", "delta", "alpha", "bravo"]);
    }

    #[test]
    fn test_sort_mixed_names_is_ordered() {
        let values: Vec<String> = (0..150u64)
            .map(|i| {
                let n = i.wrapping_mul(7919) % 997;
                match i % 5 {
                    0 => n.to_string(),
                    1 => format!("{}a", n),
                    2 => format!("{}-x", n % 50),
                    3 => "nan".to_string(),
                    _ => format!("{}.5", n),
                }
            })
            .collect();
        let columns = vec![ColumnDescriptor::text("name", "Name", |v: &String| Ok(v.clone()))];
        let mut state = TableState {
            rows_per_page: values.len(),
            ..TableState::default()
        };

        state.toggle_sort("name");
        let page = state.apply(&columns, &values);
        assert_eq!(page.rows.len(), values.len());
        let keys: Vec<SortKey> = page.rows.iter().map(|v| SortKey::new((*v).clone())).collect();
        assert!(keys.windows(2).all(|w| w[0].compare(&w[1]) != Ordering::Greater));
        assert_eq!(page.rows[0].as_str(), "0");

        state.toggle_sort("name");
        let page = state.apply(&columns, &values);
        let keys: Vec<SortKey> = page.rows.iter().map(|v| SortKey::new((*v).clone())).collect();
        assert!(keys.windows(2).all(|w| w[0].compare(&w[1]) != Ordering::Less));
    }

    #[test]
    fn test_sort_key_numbers_before_text() {
        let mut keys: Vec<SortKey> = ["1a", "10", "nan", "2", "-3", "inf"]
            .iter()
            .map(|v| SortKey::new(v.to_string()))
            .collect();
        keys.sort_by(|a, b| a.compare(b));

        assert_eq!(
            keys,
            vec![
                SortKey::Number(-3.0),
                SortKey::Number(2.0),
                SortKey::Number(10.0),
                SortKey::Text("1a".to_string()),
                SortKey::Text("inf".to_string()),
                SortKey::Text("nan".to_string()),
            ]
        );
    }

    #[test]
    fn test_failed_cells_count_as_empty() {
        let items = items();
        let columns = vec![
            ColumnDescriptor::text("name", "Name", |i: &Item| Ok(i.name.to_string())),
            ColumnDescriptor::text("size", "Size", |i: &Item| {
                if i.name == "bravo" {
                    Err(CellError::MissingField("size"))
                } else {
                    Ok(i.size.to_string())
                }
            }),
        ];

        let mut state = TableState::default();
        state.set_filter("9");
        assert_eq!(names(&state.apply(&columns, &items)), vec!["alpha"]);

        let mut state = TableState {
            rows_per_page: 2,
            ..TableState::default()
        };
        state.toggle_sort("size");
        assert_eq!(names(&state.apply(&columns, &items)), vec!["alpha", "delta"]);

        state.page = 1;
        let page = state.apply(&columns, &items);
        assert_eq!(names(&page), vec!["charlie", "bravo"]);
        assert_eq!(page.total, 4);
        assert_eq!(page.page_count, 2);
    }

    #[test]
    fn test_filter_matches_any_column() {
        let items = items();
        let mut state = TableState::default();
        state.set_filter("ALP");
        assert_eq!(names(&state.apply(&columns(), &items)), vec!["alpha"]);

        state.set_filter("100");
        assert_eq!(names(&state.apply(&columns(), &items)), vec!["charlie"]);
    }

    #[test]
    fn test_pagination_clamps_page() {
        let items = items();
        let state = TableState {
            page: 9,
            rows_per_page: 3,
            ..TableState::default()
        };

        let page = state.apply(&columns(), &items);
        assert_eq!(page.page, 1);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.total, 4);
        assert_eq!(names(&page), vec!["bravo"]);
    }

    #[test]
    fn test_empty_items_have_one_page() {
        let page = TableState::default().apply(&columns(), &[]);
        assert_eq!(page.page_count, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_query_string_encoding() {
        let pairs = vec![("quotas.q".to_string(), "team a&b".to_string())];
        let encoded = encode_query(&pairs);
        assert_eq!(encoded, "quotas.q=team%20a%26b");
        assert_eq!(decode_query(&format!("?{}", encoded)), pairs);
        assert_eq!(decode_query("?a=1+2&flag"), vec![
            ("a".to_string(), "1 2".to_string()),
            ("flag".to_string(), String::new()),
        ]);
    }
}
