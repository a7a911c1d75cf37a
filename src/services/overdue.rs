//! Overdue aggregation service
//!
//! One-shot pass over the loan lists: qualify each loan against the due-date
//! policy, group by borrower, rank by severity. Nothing is cached or stored.

use chrono::NaiveDate;
use indexmap::IndexMap;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{BorrowerOverdueSummary, LoanRecord, OverdueFilter},
    policy,
    source::LoanSource,
};

#[derive(Clone)]
pub struct OverdueService {
    source: Arc<dyn LoanSource>,
}

impl OverdueService {
    pub fn new(source: Arc<dyn LoanSource>) -> Self {
        Self { source }
    }

    /// Fetch loans from the backend and aggregate them as of `today`
    pub async fn overdue_borrowers(
        &self,
        filter: OverdueFilter,
        today: NaiveDate,
    ) -> AppResult<Vec<BorrowerOverdueSummary>> {
        let active = match filter {
            OverdueFilter::Historical => Vec::new(),
            _ => self.source.active_loans().await?,
        };
        let archived = match filter {
            OverdueFilter::Active => Vec::new(),
            _ => self.source.archived_loans().await?,
        };

        Ok(Self::aggregate(&active, &archived, filter, today))
    }

    /// Group overdue and late-returned loans by borrower, ranked by severity.
    ///
    /// Borrowers without a qualifying loan under the selected filter are
    /// absent from the result; loans with no borrower reference are skipped.
    /// The sort is stable, so equal severities keep encounter order.
    pub fn aggregate(
        active: &[LoanRecord],
        archived: &[LoanRecord],
        filter: OverdueFilter,
        today: NaiveDate,
    ) -> Vec<BorrowerOverdueSummary> {
        let mut by_borrower: IndexMap<i32, BorrowerOverdueSummary> = IndexMap::new();

        if filter != OverdueFilter::Historical {
            for loan in active {
                // A record carrying a return date is not an active loan,
                // wherever the backend filed it
                if !loan.is_active() {
                    continue;
                }
                let Some(user_id) = loan.user_id else { continue };
                let remaining = policy::days_remaining(loan.date.as_deref(), today);
                if remaining >= 0 {
                    continue;
                }
                let entry = by_borrower
                    .entry(user_id)
                    .or_insert_with(|| Self::empty_summary(user_id));
                entry.overdue_loans.push(loan.clone());
                entry.max_days_overdue = entry.max_days_overdue.max(-remaining);
            }
        }

        if filter != OverdueFilter::Active {
            for loan in archived {
                let Some(user_id) = loan.user_id else { continue };
                if !policy::was_returned_late(loan.date.as_deref(), loan.returned_date.as_deref())
                {
                    continue;
                }
                let late = policy::days_late(loan.date.as_deref(), loan.returned_date.as_deref());
                let entry = by_borrower
                    .entry(user_id)
                    .or_insert_with(|| Self::empty_summary(user_id));
                entry.late_returns.push(loan.clone());
                entry.max_days_late = entry.max_days_late.max(late);
            }
        }

        let mut summaries: Vec<BorrowerOverdueSummary> = by_borrower.into_values().collect();
        summaries.sort_by(|a, b| b.severity().cmp(&a.severity()));
        summaries
    }

    fn empty_summary(user_id: i32) -> BorrowerOverdueSummary {
        BorrowerOverdueSummary {
            user_id,
            overdue_loans: Vec::new(),
            late_returns: Vec::new(),
            max_days_overdue: 0,
            max_days_late: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 5).unwrap()
    }

    fn active_loan(id: i32, user_id: Option<i32>, date: &str) -> LoanRecord {
        LoanRecord {
            id,
            user_id,
            specimen_id: 100 + id,
            item_id: Some(200 + id),
            date: Some(date.to_string()),
            returned_date: None,
            title: None,
        }
    }

    fn archived_loan(id: i32, user_id: Option<i32>, date: &str, returned: &str) -> LoanRecord {
        LoanRecord {
            returned_date: Some(returned.to_string()),
            ..active_loan(id, user_id, date)
        }
    }

    #[test]
    fn test_overdue_loan_is_grouped_under_its_borrower() {
        // Checked out 2024-01-01, due 2024-01-31, today 2024-02-05: 5 days over
        let active = vec![active_loan(1, Some(7), "2024-01-01")];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].user_id, 7);
        assert_eq!(out[0].overdue_loans.len(), 1);
        assert_eq!(out[0].max_days_overdue, 5);
        assert_eq!(out[0].max_days_late, 0);
    }

    #[test]
    fn test_loan_within_period_is_not_reported() {
        let active = vec![active_loan(1, Some(7), "2024-01-20")];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());
        assert!(out.is_empty());
    }

    #[test]
    fn test_borrower_without_qualifying_loan_is_absent() {
        let active = vec![
            active_loan(1, Some(7), "2024-01-01"),
            active_loan(2, Some(8), "2024-02-01"),
        ];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].user_id, 7);
    }

    #[test]
    fn test_loan_without_borrower_is_skipped() {
        let active = vec![active_loan(1, None, "2024-01-01")];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());
        assert!(out.is_empty());
    }

    #[test]
    fn test_late_return_counts_under_historical_filter() {
        // Due 2024-01-31, returned 2024-02-10: 10 days late
        let archived = vec![archived_loan(1, Some(7), "2024-01-01", "2024-02-10")];
        let out = OverdueService::aggregate(&[], &archived, OverdueFilter::Historical, today());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].late_returns.len(), 1);
        assert_eq!(out[0].max_days_late, 10);
        assert_eq!(out[0].max_days_overdue, 0);
    }

    #[test]
    fn test_on_time_return_is_not_reported() {
        let archived = vec![archived_loan(1, Some(7), "2024-01-01", "2024-01-25")];
        let out = OverdueService::aggregate(&[], &archived, OverdueFilter::Historical, today());
        assert!(out.is_empty());
    }

    #[test]
    fn test_active_filter_ignores_archived_loans() {
        let archived = vec![archived_loan(1, Some(7), "2024-01-01", "2024-02-10")];
        let out = OverdueService::aggregate(&[], &archived, OverdueFilter::Active, today());
        assert!(out.is_empty());
    }

    #[test]
    fn test_both_filter_merges_populations_per_borrower() {
        let active = vec![active_loan(1, Some(7), "2024-01-01")];
        let archived = vec![archived_loan(2, Some(7), "2023-11-01", "2023-12-15")];
        let out = OverdueService::aggregate(&active, &archived, OverdueFilter::Both, today());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].overdue_loans.len(), 1);
        assert_eq!(out[0].late_returns.len(), 1);
        assert_eq!(out[0].max_days_overdue, 5);
        // Due 2023-12-01, returned 2023-12-15
        assert_eq!(out[0].max_days_late, 14);
        assert_eq!(out[0].severity(), 14);
    }

    #[test]
    fn test_sorted_descending_by_severity() {
        let active = vec![
            active_loan(1, Some(7), "2024-01-02"),  // 4 days over
            active_loan(2, Some(8), "2024-01-01"),  // 5 days over
        ];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].user_id, 8);
        assert_eq!(out[1].user_id, 7);
    }

    #[test]
    fn test_reversing_severities_reverses_order() {
        let worse = active_loan(1, Some(7), "2024-01-01");
        let milder = active_loan(2, Some(8), "2024-01-02");

        let out1 = OverdueService::aggregate(
            &[worse.clone(), milder.clone()],
            &[],
            OverdueFilter::Active,
            today(),
        );
        assert_eq!(out1[0].user_id, 7);

        // Swap the severities between the two borrowers
        let worse_for_8 = active_loan(1, Some(8), "2024-01-01");
        let milder_for_7 = active_loan(2, Some(7), "2024-01-02");
        let out2 = OverdueService::aggregate(
            &[worse_for_8, milder_for_7],
            &[],
            OverdueFilter::Active,
            today(),
        );
        assert_eq!(out2[0].user_id, 8);
    }

    #[test]
    fn test_equal_severity_keeps_encounter_order() {
        let active = vec![
            active_loan(1, Some(9), "2024-01-01"),
            active_loan(2, Some(3), "2024-01-01"),
        ];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());

        assert_eq!(out[0].user_id, 9);
        assert_eq!(out[1].user_id, 3);
    }

    #[test]
    fn test_max_is_taken_across_multiple_loans() {
        let active = vec![
            active_loan(1, Some(7), "2024-01-02"),  // 4 days over
            active_loan(2, Some(7), "2024-01-01"),  // 5 days over
        ];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].overdue_loans.len(), 2);
        assert_eq!(out[0].max_days_overdue, 5);
    }

    #[test]
    fn test_returned_loan_in_the_active_list_is_skipped() {
        // Returned late, but misfiled by the backend into the active list
        let active = vec![archived_loan(1, Some(7), "2024-01-01", "2024-02-10")];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());
        assert!(out.is_empty());
    }

    #[test]
    fn test_malformed_checkout_date_is_not_overdue() {
        let active = vec![active_loan(1, Some(7), "garbage")];
        let out = OverdueService::aggregate(&active, &[], OverdueFilter::Active, today());
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_historical_filter_skips_active_fetch() {
        let mut source = crate::source::MockLoanSource::new();
        source.expect_active_loans().never();
        source
            .expect_archived_loans()
            .times(1)
            .returning(|| Ok(vec![]));

        let service = OverdueService::new(Arc::new(source));
        let out = service
            .overdue_borrowers(OverdueFilter::Historical, today())
            .await
            .unwrap();
        assert!(out.is_empty());
    }
}
