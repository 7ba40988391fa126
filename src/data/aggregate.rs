use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::filter::FilteredView;

/// Status labels and limits the aggregator keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Exact status string counted as a completed order.
    pub completed_status: String,
    /// Exact status string counted as a cancelled order.
    pub cancelled_status: String,
    /// Number of rows kept in the top products table.
    pub top_products: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            completed_status: "CONCLUÍDO".to_string(),
            cancelled_status: "CANCELADO".to_string(),
            top_products: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Output tables
// ---------------------------------------------------------------------------

/// The five headline figures.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Kpis {
    pub total_orders: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub revenue: f64,
    /// `revenue / completed`, or exactly 0 when nothing is completed.
    pub average_ticket: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuantity {
    pub product: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionCount {
    pub region: String,
    pub orders: usize,
}

/// Everything the presenter draws for one filter selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub kpis: Kpis,
    pub revenue_by_date: Vec<DailyRevenue>,
    pub status_distribution: Vec<StatusCount>,
    pub top_products: Vec<ProductQuantity>,
    /// `None` when the source has no region column.
    pub region_counts: Option<Vec<RegionCount>>,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn summarize(view: &FilteredView<'_>, has_region: bool, options: &SummaryOptions) -> Summary {
    Summary {
        kpis: compute_kpis(view, options),
        revenue_by_date: revenue_by_date(view),
        status_distribution: status_distribution(view),
        top_products: top_products(view, options.top_products),
        region_counts: has_region.then(|| region_counts(view)),
    }
}

pub fn compute_kpis(view: &FilteredView<'_>, options: &SummaryOptions) -> Kpis {
    let mut kpis = Kpis::default();
    for rec in view.records() {
        kpis.total_orders += 1;
        kpis.revenue += rec.total_value;
        if rec.status == options.completed_status {
            kpis.completed += 1;
        }
        if rec.status == options.cancelled_status {
            kpis.cancelled += 1;
        }
    }
    kpis.average_ticket = if kpis.completed > 0 {
        kpis.revenue / kpis.completed as f64
    } else {
        0.0
    };
    kpis
}

/// Revenue per calendar day, ascending. Rows without a parsed date are skipped.
pub fn revenue_by_date(view: &FilteredView<'_>) -> Vec<DailyRevenue> {
    let mut per_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for rec in view.records() {
        if let Some(dt) = rec.created_at.parsed() {
            *per_day.entry(dt.date()).or_default() += rec.total_value;
        }
    }
    per_day
        .into_iter()
        .map(|(date, revenue)| DailyRevenue { date, revenue })
        .collect()
}

/// Row count per raw status, in first-seen order.
pub fn status_distribution(view: &FilteredView<'_>) -> Vec<StatusCount> {
    count_by(view.records().map(|r| r.status.as_str()))
        .into_iter()
        .map(|(status, count)| StatusCount {
            status: status.to_string(),
            count,
        })
        .collect()
}

/// Quantity summed per product, largest first. Ties keep first-seen order.
pub fn top_products(view: &FilteredView<'_>, limit: usize) -> Vec<ProductQuantity> {
    let mut totals: Vec<ProductQuantity> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for rec in view.records() {
        if rec.product.is_empty() {
            continue;
        }
        match index.get(rec.product.as_str()) {
            Some(&i) => totals[i].quantity += rec.quantity,
            None => {
                index.insert(rec.product.as_str(), totals.len());
                totals.push(ProductQuantity {
                    product: rec.product.clone(),
                    quantity: rec.quantity,
                });
            }
        }
    }

    // stable: equal quantities stay in first-seen order
    totals.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    totals.truncate(limit);
    totals
}

/// Rows per region code, counting only rows that carry an order id.
pub fn region_counts(view: &FilteredView<'_>) -> Vec<RegionCount> {
    let regions = view
        .records()
        .filter(|r| !r.order_id.is_empty())
        .filter_map(|r| r.region.as_deref());
    count_by(regions)
        .into_iter()
        .map(|(region, orders)| RegionCount {
            region: region.to_string(),
            orders,
        })
        .collect()
}

fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{default_selection, filter_view, FilterSelection};
    use crate::data::model::fixtures::{dated, order, product};
    use crate::data::model::{Dataset, OrderRecord, Timestamp};

    fn select(statuses: &[&str]) -> FilterSelection {
        statuses.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn completed_only_scenario() {
        let ds = Dataset::from_records(
            vec![
                order("CONCLUÍDO", 100.0),
                order("CANCELADO", 50.0),
                order("CONCLUÍDO", 200.0),
            ],
            false,
        );
        let view = filter_view(&ds, &select(&["CONCLUÍDO"]));
        let kpis = compute_kpis(&view, &SummaryOptions::default());

        assert_eq!(kpis.total_orders, 2);
        assert_eq!(kpis.completed, 2);
        assert_eq!(kpis.cancelled, 0);
        assert_eq!(kpis.revenue, 300.0);
        assert_eq!(kpis.average_ticket, 150.0);
    }

    #[test]
    fn completed_and_cancelled_counted_independently() {
        let ds = Dataset::from_records(
            vec![order("ENCERRADO", 10.0), order("CANCELADO", 5.0)],
            false,
        );
        let options = SummaryOptions {
            completed_status: "ENCERRADO".to_string(),
            cancelled_status: "ENCERRADO".to_string(),
            ..SummaryOptions::default()
        };
        let kpis = compute_kpis(&FilteredView::all(&ds), &options);

        assert_eq!(kpis.completed, 1);
        assert_eq!(kpis.cancelled, 1);
    }

    #[test]
    fn empty_view_is_all_zero() {
        let ds = Dataset::from_records(vec![order("CONCLUÍDO", 100.0)], true);
        let view = filter_view(&ds, &select(&["DEVOLVIDO"]));
        let summary = summarize(&view, ds.has_region, &SummaryOptions::default());

        assert_eq!(summary.kpis, Kpis::default());
        assert!(summary.revenue_by_date.is_empty());
        assert!(summary.status_distribution.is_empty());
        assert!(summary.top_products.is_empty());
        assert_eq!(summary.region_counts, Some(Vec::new()));
    }

    #[test]
    fn average_ticket_guarded_without_completed_orders() {
        let ds = Dataset::from_records(
            vec![order("CANCELADO", 80.0), order("A ENVIAR", 20.0)],
            false,
        );
        let kpis = compute_kpis(&FilteredView::all(&ds), &SummaryOptions::default());
        assert_eq!(kpis.revenue, 100.0);
        assert_eq!(kpis.completed, 0);
        assert_eq!(kpis.average_ticket, 0.0);
    }

    #[test]
    fn total_equals_sum_of_status_counts() {
        let ds = Dataset::from_records(
            vec![
                order("CONCLUÍDO", 1.0),
                order("A ENVIAR", 1.0),
                order("CANCELADO", 1.0),
                order("CONCLUÍDO", 1.0),
                order("ENVIADO", 1.0),
            ],
            false,
        );
        let view = filter_view(&ds, &default_selection(&ds));
        let kpis = compute_kpis(&view, &SummaryOptions::default());
        let dist = status_distribution(&view);

        assert_eq!(kpis.total_orders, dist.iter().map(|s| s.count).sum::<usize>());
        assert_eq!(dist[0], StatusCount { status: "CONCLUÍDO".into(), count: 2 });
        assert_eq!(dist.len(), 4);
    }

    #[test]
    fn unparsed_date_counts_for_status_but_not_for_dates() {
        let ds = Dataset::from_records(
            vec![
                dated("CONCLUÍDO", 10.0, 2024, 8, 27),
                OrderRecord {
                    created_at: Timestamp::Unparsed("??".into()),
                    ..order("CONCLUÍDO", 99.0)
                },
                dated("CONCLUÍDO", 5.0, 2024, 8, 26),
                dated("CANCELADO", 2.5, 2024, 8, 27),
            ],
            false,
        );
        let view = FilteredView::all(&ds);
        let by_date = revenue_by_date(&view);

        assert_eq!(by_date.len(), 2);
        assert!(by_date.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(by_date[0].revenue, 5.0);
        assert_eq!(by_date[1].revenue, 12.5);
        let dated_total: f64 = by_date.iter().map(|d| d.revenue).sum();
        assert_eq!(dated_total, 17.5);

        let dist = status_distribution(&view);
        assert_eq!(dist[0].count, 3);
    }

    #[test]
    fn top_products_sorted_truncated_and_stable() {
        let mut records = vec![product("B", 5), product("A", 5), product("C", 9)];
        for i in 0..12 {
            records.push(product(&format!("P{i}"), 1));
        }
        records.push(product("A", 1));
        records.push(product("", 50));
        let ds = Dataset::from_records(records, false);

        let top = top_products(&FilteredView::all(&ds), 10);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].product, "C");
        assert_eq!(top[1], ProductQuantity { product: "A".into(), quantity: 6 });
        assert_eq!(top[2].product, "B");
        assert_eq!(top[3].product, "P0");
        assert!(top.windows(2).all(|w| w[0].quantity >= w[1].quantity));
    }

    #[test]
    fn fewer_products_than_limit() {
        let ds = Dataset::from_records(vec![product("A", 1), product("B", 2)], false);
        let top = top_products(&FilteredView::all(&ds), 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product, "B");
    }

    #[test]
    fn region_counts_only_with_region_column() {
        let with_region = |id: &str, uf: Option<&str>| OrderRecord {
            order_id: id.to_string(),
            region: uf.map(str::to_string),
            ..order("CONCLUÍDO", 1.0)
        };
        let ds = Dataset::from_records(
            vec![
                with_region("1", Some("SP")),
                with_region("2", Some("RJ")),
                with_region("3", Some("SP")),
                with_region("", Some("SP")),
                with_region("4", None),
            ],
            true,
        );
        let view = FilteredView::all(&ds);

        let summary = summarize(&view, true, &SummaryOptions::default());
        let regions = summary.region_counts.unwrap();
        assert_eq!(
            regions,
            vec![
                RegionCount { region: "SP".into(), orders: 2 },
                RegionCount { region: "RJ".into(), orders: 1 },
            ]
        );

        let summary = summarize(&view, false, &SummaryOptions::default());
        assert_eq!(summary.region_counts, None);
    }
}
