//! Financial and membership reports.
//!
//! One endpoint loads the date-ranged donations and expenses plus the full
//! member list, then aggregates in memory: a single pass per breakdown, no
//! SQL grouping. Donations whose references cannot be resolved land in
//! "Unknown" buckets rather than being dropped.

use std::collections::{BTreeMap, HashMap};

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use steward_shared::models::donation::Donation;
use steward_shared::models::expense::Expense;
use steward_shared::models::member::Member;

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

use super::donations::DonationDto;

const DEFAULT_START: &str = "2024-01-01";
const DEFAULT_END: &str = "2024-12-31";
const RECENT_COUNT: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// Service time filter; absent or `all` means no filter.
    pub service: Option<String>,
    /// Member network filter; absent or `all` means no filter.
    pub network: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub total_donations: f64,
    pub total_expenses: f64,
    pub recent_donations: Vec<DonationDto>,
    pub donations_by_category: Vec<AmountByLabel>,
    pub donations_by_service_time: Vec<AmountByLabel>,
    pub donations_by_network: Vec<AmountByLabel>,
    pub income_vs_expenses: IncomeVsExpenses,
    pub membership_growth: Vec<GrowthPoint>,
    /// Distinct service times observed across all recorded donations.
    pub service_times: Vec<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AmountByLabel {
    pub name: String,
    pub amount: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeVsExpenses {
    pub income: f64,
    pub expenses: f64,
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    /// Month label, e.g. `Mar 2024`.
    pub month: String,
    pub new_members: i64,
    pub total_members: i64,
}

fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.get(..10)?, "%Y-%m-%d").ok()
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).expect("day 1 exists in every month")
}

fn next_month(date: NaiveDate) -> NaiveDate {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
    .expect("day 1 exists in every month")
}

fn sum_by<F>(donations: &[Donation], label_of: F) -> Vec<AmountByLabel>
where
    F: Fn(&Donation) -> String,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for donation in donations {
        *totals.entry(label_of(donation)).or_insert(0.0) += donation.amount;
    }
    totals
        .into_iter()
        .map(|(name, amount)| AmountByLabel { name, amount })
        .collect()
}

/// Monthly series from the start month through the end month. New joins are
/// counted per month; the running total includes members who joined before
/// the range.
fn membership_growth(members: &[Member], start: NaiveDate, end: NaiveDate) -> Vec<GrowthPoint> {
    let joins: Vec<NaiveDate> = members
        .iter()
        .filter_map(|m| parse_iso_date(&m.join_date))
        .collect();

    let mut points = Vec::new();
    let mut month = first_of_month(start);
    let last = first_of_month(end);
    while month <= last {
        let next = next_month(month);
        let new_members = joins.iter().filter(|d| **d >= month && **d < next).count() as i64;
        let total_members = joins.iter().filter(|d| **d < next).count() as i64;
        points.push(GrowthPoint {
            month: month.format("%b %Y").to_string(),
            new_members,
            total_members,
        });
        month = next;
    }
    points
}

fn network_label(donation: &Donation, network_of: &HashMap<String, String>) -> String {
    donation
        .member_id
        .as_deref()
        .and_then(|id| network_of.get(id))
        .cloned()
        .unwrap_or_else(|| "Unknown".to_string())
}

fn aggregate(
    donations: Vec<Donation>,
    expenses: &[Expense],
    members: &[Member],
    network_of: &HashMap<String, String>,
    start: NaiveDate,
    end: NaiveDate,
    service_times: Vec<String>,
) -> Report {
    let total_donations: f64 = donations.iter().map(|d| d.amount).sum();
    let total_expenses: f64 = expenses.iter().map(|e| e.amount).sum();

    let donations_by_category = sum_by(&donations, |d| d.category.clone());
    let donations_by_service_time = sum_by(&donations, |d| {
        d.service_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown Service Time")
            .to_string()
    });
    let donations_by_network = sum_by(&donations, |d| network_label(d, network_of));

    let membership_growth = membership_growth(members, start, end);

    // list_between returns date-descending, so the head is the most recent
    let recent_donations = donations
        .into_iter()
        .take(RECENT_COUNT)
        .map(Into::into)
        .collect();

    Report {
        total_donations,
        total_expenses,
        recent_donations,
        donations_by_category,
        donations_by_service_time,
        donations_by_network,
        income_vs_expenses: IncomeVsExpenses {
            income: total_donations,
            expenses: total_expenses,
        },
        membership_growth,
        service_times,
    }
}

fn active_filter(param: Option<String>) -> Option<String> {
    param.filter(|v| !v.is_empty() && v != "all")
}

/// GET /api/reports
///
/// Absent date bounds leave the donation and expense queries unfiltered; the
/// 2024 defaults apply only to the membership-growth month series, which
/// needs a concrete range to iterate.
pub async fn generate(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> ApiResult<Json<Report>> {
    let start_param = query.start_date.filter(|s| !s.is_empty());
    let end_param = query.end_date.filter(|s| !s.is_empty());

    let growth_start_str = start_param.clone().unwrap_or_else(|| DEFAULT_START.to_string());
    let growth_end_str = end_param.clone().unwrap_or_else(|| DEFAULT_END.to_string());
    let start = parse_iso_date(&growth_start_str)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid startDate '{growth_start_str}'")))?;
    let end = parse_iso_date(&growth_end_str)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid endDate '{growth_end_str}'")))?;

    let mut donations =
        Donation::list_between(&state.db, start_param.as_deref(), end_param.as_deref()).await?;
    let expenses =
        Expense::list_between(&state.db, start_param.as_deref(), end_param.as_deref()).await?;
    let members = Member::list(&state.db).await?;
    let service_times = Donation::distinct_service_times(&state.db).await?;

    let network_of: HashMap<String, String> = members
        .iter()
        .map(|m| (m.id.clone(), m.network.clone()))
        .collect();

    if let Some(service) = active_filter(query.service) {
        donations.retain(|d| d.service_time.as_deref() == Some(service.as_str()));
    }
    if let Some(network) = active_filter(query.network) {
        donations.retain(|d| network_label(d, &network_of) == network);
    }

    Ok(Json(aggregate(
        donations,
        &expenses,
        &members,
        &network_of,
        start,
        end,
        service_times,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(id: &str, amount: f64, date: &str, category: &str) -> Donation {
        Donation {
            id: id.to_string(),
            donor_name: "Donor".to_string(),
            member_id: None,
            amount,
            date: date.to_string(),
            category: category.to_string(),
            giving_type_id: None,
            service_time: None,
            recorded_by_id: None,
            reference: None,
        }
    }

    fn member(id: &str, join_date: &str, network: &str) -> Member {
        Member {
            id: id.to_string(),
            name: "Member".to_string(),
            email: format!("{id}@example.com"),
            phone: None,
            join_date: join_date.to_string(),
            avatar_url: None,
            address: None,
            network: network.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn test_category_breakdown_sums_per_label() {
        let donations = vec![
            donation("d1", 100.0, "2024-03-01", "Tithe"),
            donation("d2", 200.0, "2024-03-02", "Offering"),
            donation("d3", 300.0, "2024-03-03", "Tithe"),
        ];

        let report = aggregate(
            donations,
            &[],
            &[],
            &HashMap::new(),
            date("2024-01-01"),
            date("2024-12-31"),
            vec![],
        );

        assert_eq!(report.total_donations, 600.0);
        assert_eq!(
            report.donations_by_category,
            vec![
                AmountByLabel {
                    name: "Offering".to_string(),
                    amount: 200.0
                },
                AmountByLabel {
                    name: "Tithe".to_string(),
                    amount: 400.0
                },
            ]
        );
    }

    #[test]
    fn test_blank_service_time_buckets_as_unknown() {
        let mut tagged = donation("d1", 50.0, "2024-03-01", "Tithe");
        tagged.service_time = Some("First Service".to_string());
        let untagged = donation("d2", 25.0, "2024-03-02", "Tithe");

        let report = aggregate(
            vec![tagged, untagged],
            &[],
            &[],
            &HashMap::new(),
            date("2024-01-01"),
            date("2024-12-31"),
            vec![],
        );

        assert_eq!(
            report.donations_by_service_time,
            vec![
                AmountByLabel {
                    name: "First Service".to_string(),
                    amount: 50.0
                },
                AmountByLabel {
                    name: "Unknown Service Time".to_string(),
                    amount: 25.0
                },
            ]
        );
    }

    #[test]
    fn test_network_resolves_through_member_or_unknown() {
        let mut linked = donation("d1", 10.0, "2024-03-01", "Tithe");
        linked.member_id = Some("m1".to_string());
        let orphan = donation("d2", 20.0, "2024-03-02", "Tithe");

        let members = vec![member("m1", "2023-06-15", "North")];
        let network_of: HashMap<String, String> = members
            .iter()
            .map(|m| (m.id.clone(), m.network.clone()))
            .collect();

        let report = aggregate(
            vec![linked, orphan],
            &[],
            &members,
            &network_of,
            date("2024-01-01"),
            date("2024-12-31"),
            vec![],
        );

        assert_eq!(
            report.donations_by_network,
            vec![
                AmountByLabel {
                    name: "North".to_string(),
                    amount: 10.0
                },
                AmountByLabel {
                    name: "Unknown".to_string(),
                    amount: 20.0
                },
            ]
        );
    }

    #[test]
    fn test_membership_growth_counts_new_and_running_total() {
        let members = vec![
            member("m1", "2023-11-20", "Main"),
            member("m2", "2024-01-10", "Main"),
            member("m3", "2024-02-05", "Main"),
            member("m4", "2024-02-20", "Main"),
        ];

        let points = membership_growth(&members, date("2024-01-01"), date("2024-03-31"));

        assert_eq!(
            points,
            vec![
                GrowthPoint {
                    month: "Jan 2024".to_string(),
                    new_members: 1,
                    total_members: 2
                },
                GrowthPoint {
                    month: "Feb 2024".to_string(),
                    new_members: 2,
                    total_members: 4
                },
                GrowthPoint {
                    month: "Mar 2024".to_string(),
                    new_members: 0,
                    total_members: 4
                },
            ]
        );
    }

    #[test]
    fn test_recent_donations_keeps_newest_five() {
        // already date-descending, as the query layer returns them
        let donations: Vec<Donation> = (0..8)
            .map(|i| {
                donation(
                    &format!("d{i}"),
                    10.0,
                    &format!("2024-03-{:02}", 28 - i),
                    "Tithe",
                )
            })
            .collect();

        let report = aggregate(
            donations,
            &[],
            &[],
            &HashMap::new(),
            date("2024-01-01"),
            date("2024-12-31"),
            vec![],
        );

        assert_eq!(report.recent_donations.len(), 5);
        assert_eq!(report.recent_donations[0].id, "d0");
        assert_eq!(report.recent_donations[4].id, "d4");
    }

    #[test]
    fn test_month_rollover_crosses_year_boundary() {
        assert_eq!(next_month(date("2024-12-01")), date("2025-01-01"));
        assert_eq!(next_month(date("2024-06-01")), date("2024-07-01"));
    }
}
