//! Quarterly financial statements. One row per reporting period, newest
//! first, keyed by `datekey`.

use flatstore::{flat_record, optional, required};

flat_record! {
    pub struct BalanceSheet {
        pub datekey: String = required("datekey"),
        pub fiscal_year: String = optional("fiscalYear"),
        pub fiscal_quarter: String = optional("fiscalQuarter"),
        pub cash_and_equivalents: f64 = optional("cashneq"),
        pub short_term_investments: f64 = optional("investmentsc"),
        pub total_cash: f64 = optional("totalcash"),
        pub cash_growth: f64 = optional("cashGrowth"),
        pub accounts_receivable: f64 = optional("accountsReceivable"),
        pub other_receivables: f64 = optional("otherReceivables"),
        pub receivables: f64 = optional("receivables"),
        pub inventory: f64 = optional("inventory"),
        pub restricted_cash: f64 = optional("restrictedCash"),
        pub other_current_assets: f64 = optional("othercurrent"),
        pub total_current_assets: f64 = optional("assetsc"),
        pub net_ppe: f64 = optional("netPPE"),
        pub long_term_investments: f64 = optional("investmentsnc"),
        pub goodwill: f64 = optional("goodwill"),
        pub other_intangibles: f64 = optional("otherIntangibles"),
        pub other_long_term_assets: f64 = optional("othernoncurrent"),
        pub total_assets: f64 = optional("assets"),
        pub accounts_payable: f64 = optional("accountsPayable"),
        pub accrued_expenses: f64 = optional("accruedExpenses"),
        pub short_term_debt: f64 = optional("debtc"),
        pub current_portion_debt: f64 = optional("currentPortDebt"),
        pub current_capital_leases: f64 = optional("currentCapLeases"),
        pub current_income_taxes_payable: f64 = optional("currentIncomeTaxesPayable"),
        pub current_unearned_revenue: f64 = optional("currentUnearnedRevenue"),
        pub other_current_liabilities: f64 = optional("otherCurrentLiabilities"),
        pub total_current_liabilities: f64 = optional("currentLiabilities"),
        pub long_term_debt: f64 = optional("debtnc"),
        pub capital_leases: f64 = optional("capitalLeases"),
        pub long_term_unearned_revenue: f64 = optional("longTermUnearnedRevenue"),
        pub long_term_deferred_tax_liabilities: f64 = optional("longTermDeferredTaxLiabilities"),
        pub other_long_term_liabilities: f64 = optional("otherliabilitiesnoncurrent"),
        pub total_liabilities: f64 = optional("liabilities"),
        pub common_stock: f64 = optional("commonStock"),
        pub retained_earnings: f64 = optional("retearn"),
        pub other_equity: f64 = optional("otherEquity"),
        pub shareholders_equity: f64 = optional("equity"),
        pub total_liabilities_and_equity: f64 = optional("liabilitiesequity"),
        pub shares_out_filing_date: f64 = optional("sharesOutFilingDate"),
        pub shares_out_total_common: f64 = optional("sharesOutTotalCommon"),
        pub book_value_per_share: f64 = optional("bvps"),
        pub tangible_book_value: f64 = optional("tangibleBookValue"),
        pub tangible_book_value_per_share: f64 = optional("tangibleBookValuePerShare"),
        pub total_debt: f64 = optional("debt"),
        pub net_cash: f64 = optional("netcash"),
        pub net_cash_growth: f64 = optional("netCashGrowth"),
        pub net_cash_per_share: f64 = optional("netcashpershare"),
        pub working_capital: f64 = optional("workingcapital"),
        pub land: f64 = optional("land"),
        pub machinery: f64 = optional("machinery"),
        pub leasehold_improvements: f64 = optional("leaseholdImprovements"),
        pub trading_asset_securities: f64 = optional("tradingAssetSecurities"),
    }
}

flat_record! {
    pub struct CashFlow {
        pub datekey: String = required("datekey"),
        pub fiscal_year: String = optional("fiscalYear"),
        pub fiscal_quarter: String = optional("fiscalQuarter"),
        pub net_income: f64 = optional("netIncomeCF"),
        pub depreciation_amortization: f64 = optional("totalDepAmorCF"),
        pub stock_based_compensation: f64 = optional("sbcomp"),
        pub change_receivables: f64 = optional("changeAR"),
        pub change_inventory: f64 = optional("changeInventory"),
        pub change_payables: f64 = optional("changeAP"),
        pub change_unearned_revenue: f64 = optional("changeUnearnedRev"),
        pub change_other_operating_assets: f64 = optional("changeOtherNetOperAssets"),
        pub other_operating: f64 = optional("otheroperating"),
        pub operating_cash_flow: f64 = optional("ncfo"),
        pub operating_cash_flow_growth: f64 = optional("ocfGrowth"),
        pub capex: f64 = optional("capex"),
        pub acquisitions: f64 = optional("cashAcquisition"),
        pub intangibles_sale_purchase: f64 = optional("salePurchaseIntangibles"),
        pub securities_investment: f64 = optional("investInSecurities"),
        pub other_investing: f64 = optional("otherinvesting"),
        pub investing_cash_flow: f64 = optional("ncfi"),
        pub short_term_debt_issued: f64 = optional("debtIssuedShortTerm"),
        pub long_term_debt_issued: f64 = optional("debtIssuedLongTerm"),
        pub total_debt_issued: f64 = optional("debtIssuedTotal"),
        pub short_term_debt_repaid: f64 = optional("debtRepaidShortTerm"),
        pub long_term_debt_repaid: f64 = optional("debtRepaidLongTerm"),
        pub total_debt_repaid: f64 = optional("debtRepaidTotal"),
        pub net_debt_issued: f64 = optional("netDebtIssued"),
        pub common_issued: f64 = optional("commonIssued"),
        pub common_repurchased: f64 = optional("commonRepurchased"),
        pub common_dividends: f64 = optional("commonDividendCF"),
        pub other_financing: f64 = optional("otherfinancing"),
        pub financing_cash_flow: f64 = optional("ncff"),
        pub net_cash_flow: f64 = optional("ncf"),
        pub free_cash_flow: f64 = optional("fcf"),
        pub free_cash_flow_growth: f64 = optional("fcfGrowth"),
        pub free_cash_flow_margin: f64 = optional("fcfMargin"),
        pub free_cash_flow_per_share: f64 = optional("fcfps"),
        pub levered_free_cash_flow: f64 = optional("leveredFCF"),
        pub unlevered_free_cash_flow: f64 = optional("unleveredFCF"),
        pub cash_interest_paid: f64 = optional("cashInterestPaid"),
        pub cash_taxes_paid: f64 = optional("cashTaxesPaid"),
        pub change_net_working_capital: f64 = optional("changeNetWorkingCapital"),
    }
}

flat_record! {
    pub struct IncomeStatement {
        pub datekey: String = required("datekey"),
        pub fiscal_year: String = optional("fiscalYear"),
        pub fiscal_quarter: String = optional("fiscalQuarter"),
        pub revenue: f64 = optional("revenue"),
        pub revenue_growth: f64 = optional("revenueGrowth"),
        pub cost_of_revenue: f64 = optional("cor"),
        pub gross_profit: f64 = optional("gp"),
        pub sga: f64 = optional("sgna"),
        pub research_development: f64 = optional("rnd"),
        pub operating_expenses: f64 = optional("opex"),
        pub operating_income: f64 = optional("opinc"),
        pub interest_expense: f64 = optional("interestExpense"),
        pub interest_income: f64 = optional("interestIncome"),
        pub currency_gains: f64 = optional("currencyGains"),
        pub other_non_operating: f64 = optional("otherNonOperating"),
        pub ebt_excluding_unusual: f64 = optional("ebtExcl"),
        pub gain_on_investments: f64 = optional("gainInvestments"),
        pub pretax_income: f64 = optional("pretax"),
        pub income_tax: f64 = optional("taxexp"),
        pub net_income: f64 = optional("netinc"),
        pub net_income_common: f64 = optional("netinccmn"),
        pub net_income_growth: f64 = optional("netIncomeGrowth"),
        pub shares_basic: f64 = optional("sharesBasic"),
        pub shares_diluted: f64 = optional("sharesDiluted"),
        pub shares_change: f64 = optional("sharesYoY"),
        pub eps_basic: f64 = optional("epsBasic"),
        pub eps_diluted: f64 = optional("epsdil"),
        pub eps_growth: f64 = optional("epsGrowth"),
        pub free_cash_flow: f64 = optional("fcf"),
        pub free_cash_flow_per_share: f64 = optional("fcfps"),
        pub dividend_per_share: f64 = optional("dps"),
        pub dividend_growth: f64 = optional("dividendGrowth"),
        pub gross_margin: f64 = optional("grossMargin"),
        pub operating_margin: f64 = optional("operatingMargin"),
        pub profit_margin: f64 = optional("profitMargin"),
        pub free_cash_flow_margin: f64 = optional("fcfMargin"),
        pub effective_tax_rate: f64 = optional("taxrate"),
        pub ebitda: f64 = optional("ebitda"),
        pub ebitda_depreciation_amortization: f64 = optional("depAmorEbitda"),
        pub ebitda_margin: f64 = optional("ebitdaMargin"),
        pub ebit: f64 = optional("ebit"),
        pub ebit_margin: f64 = optional("ebitMargin"),
        pub revenue_as_reported: f64 = optional("revenueAsReported"),
        pub payout_ratio: f64 = optional("payoutratio"),
    }
}

flat_record! {
    pub struct FinancialRatios {
        pub datekey: String = required("datekey"),
        pub fiscal_year: String = optional("fiscalYear"),
        pub fiscal_quarter: String = optional("fiscalQuarter"),
        pub market_cap: f64 = optional("marketcap"),
        pub market_cap_growth: f64 = optional("marketCapGrowth"),
        pub enterprise_value: f64 = optional("ev"),
        pub last_close: f64 = optional("lastCloseRatios"),
        pub pe_ratio: f64 = optional("pe"),
        pub ps_ratio: f64 = optional("ps"),
        pub pb_ratio: f64 = optional("pb"),
        pub p_fcf_ratio: f64 = optional("pfcf"),
        pub p_ocf_ratio: f64 = optional("pocf"),
        pub ev_revenue: f64 = optional("evRevenue"),
        pub ev_ebitda: f64 = optional("evEbitda"),
        pub ev_ebit: f64 = optional("evEbit"),
        pub ev_fcf: f64 = optional("evFcf"),
        pub debt_equity: f64 = optional("debtEquity"),
        pub debt_ebitda: f64 = optional("debtEbitda"),
        pub debt_fcf: f64 = optional("debtFcf"),
        pub asset_turnover: f64 = optional("assetTurnover"),
        pub inventory_turnover: f64 = optional("inventoryTurnover"),
        pub quick_ratio: f64 = optional("quickRatio"),
        pub current_ratio: f64 = optional("currentRatio"),
        pub roe: f64 = optional("roe"),
        pub roa: f64 = optional("roa"),
        pub roic: f64 = optional("roic"),
        pub earnings_yield: f64 = optional("earningsYield"),
        pub fcf_yield: f64 = optional("fcfYield"),
        pub dividend_yield: f64 = optional("dividendYield"),
        pub payout_ratio: f64 = optional("payoutRatio"),
        pub buyback_yield: f64 = optional("buybackYield"),
        pub total_return: f64 = optional("totalReturn"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flatstore::{Kind, Record};

    #[test]
    fn field_tables_have_upstream_widths() {
        assert_eq!(BalanceSheet::schema().fields.len(), 54);
        assert_eq!(CashFlow::schema().fields.len(), 42);
        assert_eq!(IncomeStatement::schema().fields.len(), 44);
        assert_eq!(FinancialRatios::schema().fields.len(), 32);
    }

    #[test]
    fn only_the_period_key_is_required() {
        for schema in [
            BalanceSheet::schema(),
            CashFlow::schema(),
            IncomeStatement::schema(),
            FinancialRatios::schema(),
        ] {
            let required: Vec<_> = schema.required().map(|f| f.source).collect();
            assert_eq!(required, ["datekey"], "{}", schema.name);
        }
    }

    #[test]
    fn source_names_are_kept_verbatim() {
        let schema = CashFlow::schema();
        assert_eq!(schema.field("other_operating").unwrap().source, "otheroperating");
        assert_eq!(schema.field("free_cash_flow").unwrap().kind, Kind::Float);
        assert_eq!(IncomeStatement::schema().field("eps_diluted").unwrap().source, "epsdil");
    }
}
