//! Chart and legend data derived from the task list.
//! Recomputed from scratch on every call.

use crate::models::{Category, Task};
use crate::utils::time::{format_hhmm, ms_to_hours};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Hours per category for one day bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub date: String,
    /// One entry per chart category, in `Chart::categories` order.
    pub hours: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Chart {
    /// Category names in order of first appearance.
    pub categories: Vec<String>,
    /// One row per date, ascending.
    pub rows: Vec<ChartRow>,
}

impl Chart {
    /// Hours of `category` on the row for `date`, if both exist.
    pub fn value(&self, date: &str, category: &str) -> Option<f64> {
        let col = self.categories.iter().position(|c| c == category)?;
        let row = self.rows.iter().find(|r| r.date == date)?;
        row.hours.get(col).copied()
    }

    /// `[{ "date": ..., "<category>": hours, ... }]`
    pub fn to_json_rows(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let mut obj = Map::new();
                obj.insert("date".into(), Value::String(row.date.clone()));
                for (name, h) in self.categories.iter().zip(&row.hours) {
                    obj.insert(name.clone(), serde_json::json!(h));
                }
                Value::Object(obj)
            })
            .collect()
    }
}

/// Group all tasks (hidden ones included) by date, then by category name.
/// Categories absent on a date are filled with 0.
pub fn group_by_date_and_category(tasks: &[Task]) -> Chart {
    let mut categories: Vec<String> = Vec::new();
    let mut by_date: BTreeMap<&str, BTreeMap<&str, i64>> = BTreeMap::new();

    for task in tasks {
        let name = task.category_name();
        if !categories.iter().any(|c| c == name) {
            categories.push(name.to_string());
        }
        *by_date
            .entry(task.date.as_str())
            .or_default()
            .entry(name)
            .or_insert(0) += task.milliseconds;
    }

    let rows = by_date
        .into_iter()
        .map(|(date, totals)| ChartRow {
            date: date.to_string(),
            hours: categories
                .iter()
                .map(|c| ms_to_hours(totals.get(c.as_str()).copied().unwrap_or(0)))
                .collect(),
        })
        .collect();

    Chart { categories, rows }
}

/// Total time of one category across the visible tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub id: Option<String>,
    pub name: String,
    pub color: Option<String>,
    pub milliseconds: i64,
    /// `"<name> (HH:MM)"`
    pub label: String,
}

/// Sum milliseconds per category over visible tasks, in order of first
/// appearance. `categories` supplies ids and colors where known.
pub fn category_totals(tasks: &[Task], categories: &[Category]) -> Vec<CategoryTotal> {
    let mut order: Vec<&str> = Vec::new();
    let mut sums: BTreeMap<&str, i64> = BTreeMap::new();

    for task in tasks.iter().filter(|t| t.is_visible) {
        let name = task.category_name();
        if !sums.contains_key(name) {
            order.push(name);
        }
        *sums.entry(name).or_insert(0) += task.milliseconds;
    }

    order
        .into_iter()
        .map(|name| {
            let ms = sums.get(name).copied().unwrap_or(0);
            let known = categories.iter().find(|c| c.name == name);
            CategoryTotal {
                id: known.map(|c| c.id.clone()),
                name: name.to_string(),
                color: known.map(|c| c.color.clone()).or_else(|| {
                    tasks
                        .iter()
                        .find(|t| t.category_name() == name)
                        .and_then(|t| t.category_color().map(str::to_string))
                }),
                milliseconds: ms,
                label: format!("{name} ({})", format_hhmm(ms)),
            }
        })
        .collect()
}
