use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::RentPayment;
use crate::repository::ledger::{RentLedger, TenancyCharge};

/// Underpayments up to one unit of currency are forgiven, absorbing
/// rounding differences between what was billed and what was handed over.
const UNDERPAYMENT_TOLERANCE: f64 = 1.0;

const TOP_DUES_LIMIT: usize = 5;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Normalized (year, month-number) billing key. Payment rows store the
/// English month name on the wire; everything internal orders and compares
/// on this key so the name string never drives correctness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BillingPeriod {
    pub year: i32,
    pub month: u32,
}

impl BillingPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// Parses the stored month name. Returns `None` for anything that is
    /// not a calendar month, notably the "Advance" label.
    pub fn parse(month_name: &str, year: i32) -> Option<Self> {
        MONTH_NAMES
            .iter()
            .position(|name| *name == month_name)
            .map(|index| Self {
                year,
                month: (index + 1) as u32,
            })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TenantDue {
    pub tenant_name: String,
    pub tenant_id: Uuid,
    pub flat_no: String,
    pub due_amount: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_revenue: f64,
    pub total_due: f64,
    pub collected_count: i64,
    pub total_flats: i64,
    pub occupied_flats: i64,
    pub top_dues: Vec<TenantDue>,
}

/// Computes the landlord's dashboard from a full snapshot of active
/// tenancies, flats and payment histories. Purely read-only; any ledger
/// failure aborts the whole computation so `total_due` is never partial.
pub async fn compute_dashboard<L: RentLedger + ?Sized>(
    ledger: &L,
    landlord_id: Uuid,
    today: NaiveDate,
) -> AppResult<DashboardStats> {
    let current = BillingPeriod::from_date(today);

    let (total_revenue, collected_count) = ledger
        .collected_for_period(landlord_id, current.month_name(), current.year)
        .await?;
    let total_flats = ledger.flat_count(landlord_id).await?;
    let occupied_flats = ledger.occupied_count(landlord_id).await?;

    let mut total_due = 0.0;
    let mut dues: Vec<TenantDue> = Vec::new();

    for tenancy in ledger.active_tenancies(landlord_id).await? {
        let payments = ledger.payments_for_tenant(tenancy.tenant_id).await?;
        let due = due_for_tenancy(&tenancy, &payments, current);
        if due > 0.0 {
            total_due += due;
            dues.push(TenantDue {
                tenant_name: tenancy.tenant_name.clone(),
                tenant_id: tenancy.tenant_id,
                flat_no: tenancy.flat_number.clone(),
                due_amount: due,
            });
        }
    }

    dues.sort_by(|a, b| b.due_amount.total_cmp(&a.due_amount));
    dues.truncate(TOP_DUES_LIMIT);

    Ok(DashboardStats {
        total_revenue,
        total_due,
        collected_count,
        total_flats,
        occupied_flats,
        top_dues: dues,
    })
}

/// Walks every billing period from the tenant's join month through the
/// current month inclusive and accumulates the shortfall for each.
///
/// When several records land in one period their payments are summed, but
/// the electricity charge is taken from the first record only. That
/// tie-break is deliberate and load-bearing; see `first_record_wins_for_electricity`.
pub fn due_for_tenancy(
    tenancy: &TenancyCharge,
    payments: &[RentPayment],
    current: BillingPeriod,
) -> f64 {
    let flat_total = tenancy.flat_total();
    let mut period = BillingPeriod::from_date(tenancy.join_date.date_naive());
    let mut due = 0.0;

    while period <= current {
        let mut paid = 0.0;
        let mut electricity = None;

        for payment in payments {
            if payment.is_advance {
                continue;
            }
            if BillingPeriod::parse(&payment.month, payment.year) != Some(period) {
                continue;
            }
            paid += payment.total_paid;
            if electricity.is_none() {
                electricity = Some(payment.electricity_bill);
            }
        }

        match electricity {
            None => due += flat_total,
            Some(electricity) => {
                let expected = flat_total + electricity;
                if paid < expected - UNDERPAYMENT_TOLERANCE {
                    due += expected - paid;
                }
            }
        }

        period = period.next();
    }

    due
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeLedger {
        tenancies: Vec<TenancyCharge>,
        payments: HashMap<Uuid, Vec<RentPayment>>,
        collected: (f64, i64),
        flats: i64,
        occupied: i64,
        fail_payments: bool,
    }

    #[async_trait]
    impl RentLedger for FakeLedger {
        async fn active_tenancies(&self, _landlord_id: Uuid) -> AppResult<Vec<TenancyCharge>> {
            Ok(self.tenancies.clone())
        }

        async fn payments_for_tenant(&self, tenant_id: Uuid) -> AppResult<Vec<RentPayment>> {
            if self.fail_payments {
                return Err(AppError::Retrieval("payment read failed".to_string()));
            }
            Ok(self.payments.get(&tenant_id).cloned().unwrap_or_default())
        }

        async fn collected_for_period(
            &self,
            _landlord_id: Uuid,
            _month: &str,
            _year: i32,
        ) -> AppResult<(f64, i64)> {
            Ok(self.collected)
        }

        async fn flat_count(&self, _landlord_id: Uuid) -> AppResult<i64> {
            Ok(self.flats)
        }

        async fn occupied_count(&self, _landlord_id: Uuid) -> AppResult<i64> {
            Ok(self.occupied)
        }
    }

    fn tenancy(name: &str, basic_rent: f64, join_year: i32, join_month: u32) -> TenancyCharge {
        TenancyCharge {
            tenant_id: Uuid::new_v4(),
            tenant_name: name.to_string(),
            flat_number: "A-1".to_string(),
            join_date: Utc
                .with_ymd_and_hms(join_year, join_month, 15, 12, 0, 0)
                .unwrap(),
            basic_rent,
            gas_bill: 0.0,
            utility_bill: 0.0,
            water_charges: 0.0,
        }
    }

    fn payment(tenant_id: Uuid, month: &str, year: i32, total_paid: f64, electricity: f64) -> RentPayment {
        RentPayment {
            id: Uuid::new_v4(),
            tenant_id,
            month: month.to_string(),
            year,
            basic_rent: 0.0,
            gas_bill: 0.0,
            electricity_bill: electricity,
            utility_bill: 0.0,
            water_charges: 0.0,
            total_paid,
            is_advance: false,
            payment_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn advance(tenant_id: Uuid, amount: f64, year: i32) -> RentPayment {
        let mut record = payment(tenant_id, "Advance", year, amount, 0.0);
        record.is_advance = true;
        record
    }

    fn april_15_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
    }

    #[test]
    fn billing_period_orders_across_year_boundary() {
        let december = BillingPeriod {
            year: 2024,
            month: 12,
        };
        let january = december.next();
        assert_eq!(january, BillingPeriod { year: 2025, month: 1 });
        assert!(december < january);
        assert_eq!(january.month_name(), "January");
    }

    #[test]
    fn billing_period_parse_rejects_advance_label() {
        assert_eq!(
            BillingPeriod::parse("March", 2025),
            Some(BillingPeriod { year: 2025, month: 3 })
        );
        assert_eq!(BillingPeriod::parse("Advance", 2025), None);
        assert_eq!(BillingPeriod::parse("march", 2025), None);
    }

    #[test]
    fn no_payments_owes_full_flat_total_per_month_inclusive() {
        // Joined January, current month April: 4 periods, both ends counted.
        let t = tenancy("Alam", 5000.0, 2025, 1);
        let due = due_for_tenancy(&t, &[], BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 20000.0);
    }

    #[test]
    fn exact_payment_clears_the_period() {
        let t = tenancy("Alam", 5000.0, 2025, 4);
        let payments = vec![payment(t.tenant_id, "April", 2025, 5300.0, 300.0)];
        let due = due_for_tenancy(&t, &payments, BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 0.0);
    }

    #[test]
    fn one_unit_short_is_within_tolerance() {
        let t = tenancy("Alam", 5000.0, 2025, 4);
        let payments = vec![payment(t.tenant_id, "April", 2025, 5299.0, 300.0)];
        let due = due_for_tenancy(&t, &payments, BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 0.0);
    }

    #[test]
    fn just_past_tolerance_owes_the_shortfall() {
        let t = tenancy("Alam", 5000.0, 2025, 4);
        let payments = vec![payment(t.tenant_id, "April", 2025, 5298.99, 300.0)];
        let due = due_for_tenancy(&t, &payments, BillingPeriod::from_date(april_15_2025()));
        assert!((due - 1.01).abs() < 1e-9);
    }

    #[test]
    fn unpaid_months_plus_partial_month() {
        // Joined January, paid only the base rent in April where 300 of
        // electricity was billed: 3 full months + the 300 shortfall.
        let t = tenancy("Alam", 5000.0, 2025, 1);
        let payments = vec![payment(t.tenant_id, "April", 2025, 5000.0, 300.0)];
        let due = due_for_tenancy(&t, &payments, BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 15300.0);
    }

    #[test]
    fn advance_records_never_count_as_period_payment() {
        let t = tenancy("Alam", 5000.0, 2025, 4);
        let payments = vec![advance(t.tenant_id, 50000.0, 2025)];
        let due = due_for_tenancy(&t, &payments, BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 5000.0);
    }

    #[test]
    fn first_record_wins_for_electricity() {
        // Two records in the same period with different electricity values.
        // The first record's 300 sets the expectation; the second's 900 is
        // ignored, so 5000 + 500 paid covers the 5300 expected.
        let t = tenancy("Alam", 5000.0, 2025, 4);
        let payments = vec![
            payment(t.tenant_id, "April", 2025, 5000.0, 300.0),
            payment(t.tenant_id, "April", 2025, 500.0, 900.0),
        ];
        let due = due_for_tenancy(&t, &payments, BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 0.0);
    }

    #[test]
    fn fixed_charges_all_enter_the_flat_total() {
        let mut t = tenancy("Alam", 5000.0, 2025, 4);
        t.gas_bill = 800.0;
        t.utility_bill = 500.0;
        t.water_charges = 200.0;
        let due = due_for_tenancy(&t, &[], BillingPeriod::from_date(april_15_2025()));
        assert_eq!(due, 6500.0);
    }

    #[tokio::test]
    async fn dashboard_aggregates_counts_and_dues() {
        let t1 = tenancy("Alam", 5000.0, 2025, 3);
        let t2 = tenancy("Karim", 7000.0, 2025, 4);
        let mut payments = HashMap::new();
        payments.insert(
            t2.tenant_id,
            vec![payment(t2.tenant_id, "April", 2025, 7000.0, 0.0)],
        );

        let ledger = FakeLedger {
            tenancies: vec![t1.clone(), t2],
            payments,
            collected: (7000.0, 1),
            flats: 6,
            occupied: 2,
            ..Default::default()
        };

        let stats = compute_dashboard(&ledger, Uuid::new_v4(), april_15_2025())
            .await
            .unwrap();

        assert_eq!(stats.total_revenue, 7000.0);
        assert_eq!(stats.collected_count, 1);
        assert_eq!(stats.total_flats, 6);
        assert_eq!(stats.occupied_flats, 2);
        // Only Alam owes: March + April.
        assert_eq!(stats.total_due, 10000.0);
        assert_eq!(stats.top_dues.len(), 1);
        assert_eq!(stats.top_dues[0].tenant_id, t1.tenant_id);
    }

    #[tokio::test]
    async fn top_dues_is_capped_at_five_and_sorted_descending() {
        let tenancies: Vec<TenancyCharge> = (1..=7)
            .map(|i| tenancy(&format!("Tenant {i}"), 1000.0 * i as f64, 2025, 4))
            .collect();
        let ledger = FakeLedger {
            tenancies,
            occupied: 7,
            ..Default::default()
        };

        let stats = compute_dashboard(&ledger, Uuid::new_v4(), april_15_2025())
            .await
            .unwrap();

        assert_eq!(stats.top_dues.len(), 5);
        assert_eq!(stats.top_dues[0].due_amount, 7000.0);
        assert!(stats
            .top_dues
            .windows(2)
            .all(|pair| pair[0].due_amount >= pair[1].due_amount));
        // The cap trims the response; the total still covers everyone.
        assert_eq!(stats.total_due, 28000.0);
    }

    #[tokio::test]
    async fn ledger_failure_aborts_the_whole_computation() {
        let ledger = FakeLedger {
            tenancies: vec![tenancy("Alam", 5000.0, 2025, 1)],
            fail_payments: true,
            ..Default::default()
        };

        let result = compute_dashboard(&ledger, Uuid::new_v4(), april_15_2025()).await;
        assert!(matches!(result, Err(AppError::Retrieval(_))));
    }

    #[tokio::test]
    async fn future_join_date_contributes_nothing() {
        let ledger = FakeLedger {
            tenancies: vec![tenancy("Alam", 5000.0, 2025, 6)],
            occupied: 1,
            ..Default::default()
        };

        let stats = compute_dashboard(&ledger, Uuid::new_v4(), april_15_2025())
            .await
            .unwrap();
        assert_eq!(stats.total_due, 0.0);
        assert!(stats.top_dues.is_empty());
    }
}
