// ── Salary breakdown ──
//
// Derived monthly figures for the Salary tab. Everything is rounded to
// two decimals at each step, so the parts add up to what the operator sees.

use serde::{Deserialize, Serialize};

/// HRA as a fraction of basic salary.
pub const HRA_RATE: f64 = 0.40;
/// Provident fund contribution, employer and employee alike.
pub const PF_RATE: f64 = 0.12;

/// Round half away from zero to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    pub monthly_ctc: f64,
    pub basic_salary: f64,
    pub hra: f64,
    pub employer_pf_contribution: f64,
    pub employee_pf_contribution: f64,
    pub allowances: f64,
}

/// Derive the monthly breakdown from annual CTC and monthly basic.
pub fn derive_salary(annual_ctc: f64, basic_salary: f64, pf_enrolled: bool) -> SalaryBreakdown {
    let monthly_ctc = round2(annual_ctc / 12.0);
    let hra = round2(basic_salary * HRA_RATE);
    let pf = if pf_enrolled {
        round2(basic_salary * PF_RATE)
    } else {
        0.0
    };
    let allowances = round2(monthly_ctc - basic_salary - hra - pf);

    SalaryBreakdown {
        monthly_ctc,
        basic_salary,
        hra,
        employer_pf_contribution: pf,
        employee_pf_contribution: pf,
        allowances,
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn enrolled_breakdown() {
        let b = derive_salary(600_000.0, 20_000.0, true);
        assert_eq!(
            b,
            SalaryBreakdown {
                monthly_ctc: 50_000.0,
                basic_salary: 20_000.0,
                hra: 8_000.0,
                employer_pf_contribution: 2_400.0,
                employee_pf_contribution: 2_400.0,
                allowances: 19_600.0,
            }
        );
    }

    #[test]
    fn not_enrolled_has_no_pf() {
        let b = derive_salary(600_000.0, 20_000.0, false);
        assert_eq!(b.employer_pf_contribution, 0.0);
        assert_eq!(b.employee_pf_contribution, 0.0);
        assert_eq!(b.allowances, 22_000.0);
    }

    #[test]
    fn rounds_to_paise() {
        let b = derive_salary(100_000.0, 3_333.33, true);
        assert_eq!(b.monthly_ctc, 8_333.33);
        assert_eq!(b.hra, 1_333.33);
        assert_eq!(b.employee_pf_contribution, 400.0);
        assert_eq!(b.allowances, round2(8_333.33 - 3_333.33 - 1_333.33 - 400.0));
    }

    #[test]
    fn pf_parts_are_equal() {
        for basic in [0.0, 1.0, 12_345.67, 99_999.99] {
            let b = derive_salary(1_200_000.0, basic, true);
            assert_eq!(b.employer_pf_contribution, b.employee_pf_contribution);
            assert_eq!(b.employee_pf_contribution, round2(basic * PF_RATE));
        }
    }
}
