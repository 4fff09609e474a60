//! HTML pages served to the browser

use askama::Template;
use axum::http::StatusCode;
use shared::Address;

use super::chart::{Chart, ChartCounter, ChartKind};
use super::render;
use crate::config::DashboardConfig;
use crate::error::AppResult;
use crate::services::account::{AccountDetail, BalanceEntry};
use crate::services::bond::{BondDetail, BondSummary};
use crate::services::dashboard::{AccountActivity, DashboardOverview};
use crate::services::tranche::{Holder, TrancheDetail};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    chart_script_url: &'a str,
    demo_bond: &'a str,
    demo_account: &'a str,
    demo_tranche: &'a str,
    accounts: &'a [AccountActivity],
    accounts_chart: String,
    tokens_chart: String,
}

struct BondRow {
    id: Address,
    symbol: String,
    is_mature: bool,
    maturity: String,
}

#[derive(Template)]
#[template(path = "bonds.html")]
struct BondsTemplate<'a> {
    chart_script_url: &'a str,
    rows: Vec<BondRow>,
}

struct TrancheSection {
    tranche: Address,
    chart: String,
    holders: Vec<Address>,
}

#[derive(Template)]
#[template(path = "bond.html")]
struct BondTemplate<'a> {
    chart_script_url: &'a str,
    id: Address,
    symbol: &'a str,
    is_mature: bool,
    maturity: String,
    status: &'static str,
    total_collateral: String,
    total_debt: String,
    sections: Vec<TrancheSection>,
}

#[derive(Template)]
#[template(path = "tranche.html")]
struct TrancheTemplate<'a> {
    chart_script_url: &'a str,
    id: Address,
    bond: Address,
    symbol: &'a str,
    total_collateral: String,
    ratio: String,
    index: u32,
    chart: String,
    holders: Vec<Address>,
}

struct BalanceRow {
    ordinal: usize,
    resolved: bool,
    tranche: String,
    symbol: String,
    amount: String,
    problem: String,
}

#[derive(Template)]
#[template(path = "account.html")]
struct AccountTemplate<'a> {
    chart_script_url: &'a str,
    id: Address,
    rows: Vec<BalanceRow>,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    chart_script_url: &'a str,
    code: u16,
    reason: &'a str,
    message: &'a str,
}

fn holders_chart(title: &str, legend: &str, holders: &[Holder]) -> Chart {
    holders.iter().fold(
        Chart::new(ChartKind::Pie, title, legend),
        |chart, holder| chart.point(holder.account.to_checksum(), holder.chart_value),
    )
}

fn holder_accounts(holders: &[Holder]) -> Vec<Address> {
    holders.iter().map(|holder| holder.account).collect()
}

pub fn index_page(
    demo: &DashboardConfig,
    chart_script_url: &str,
    overview: &DashboardOverview,
) -> AppResult<String> {
    let mut charts = ChartCounter::default();

    let accounts_chart = overview.accounts.iter().fold(
        Chart::new(
            ChartKind::Bar,
            "Accounts with most different balances",
            "Accounts with most different balances",
        ),
        |chart, activity| {
            chart.point(activity.account.to_checksum(), activity.balance_count as f64)
        },
    );
    let tokens_chart = overview.tokens.iter().fold(
        Chart::new(
            ChartKind::Bar,
            "Tokens with highest total supply",
            "Tokens with highest total supply",
        ),
        |chart, supply| chart.point(supply.symbol.clone(), supply.chart_value),
    );

    render(&IndexTemplate {
        chart_script_url,
        demo_bond: &demo.demo_bond,
        demo_account: &demo.demo_account,
        demo_tranche: &demo.demo_tranche,
        accounts: &overview.accounts,
        accounts_chart: charts.render(&accounts_chart)?,
        tokens_chart: charts.render(&tokens_chart)?,
    })
}

pub fn bonds_page(chart_script_url: &str, bonds: &[BondSummary]) -> AppResult<String> {
    let rows = bonds
        .iter()
        .map(|summary| BondRow {
            id: summary.bond.id,
            symbol: summary.collateral.symbol.clone(),
            is_mature: summary.bond.is_mature,
            maturity: summary.bond.maturity_date.format(DATE_FORMAT).to_string(),
        })
        .collect();

    render(&BondsTemplate {
        chart_script_url,
        rows,
    })
}

pub fn bond_page(chart_script_url: &str, detail: &BondDetail) -> AppResult<String> {
    let bond = &detail.bond;
    let collateral = &detail.collateral;
    let mut charts = ChartCounter::default();

    let mut sections = Vec::with_capacity(detail.tranches.len());
    for entry in &detail.tranches {
        let chart = if entry.holders.is_empty() {
            String::new()
        } else {
            let legend = format!("Holders of Tranche: {}", entry.tranche);
            charts.render(&holders_chart("Holders:", &legend, &entry.holders))?
        };
        sections.push(TrancheSection {
            tranche: entry.tranche,
            chart,
            holders: holder_accounts(&entry.holders),
        });
    }

    render(&BondTemplate {
        chart_script_url,
        id: bond.id,
        symbol: &collateral.symbol,
        is_mature: bond.is_mature,
        maturity: bond.maturity_date.format(DATE_FORMAT).to_string(),
        status: bond.maturity_status(),
        total_collateral: bond.total_collateral.display_scaled(collateral.decimals),
        total_debt: bond.total_debt.display_scaled(collateral.decimals),
        sections,
    })
}

pub fn tranche_page(chart_script_url: &str, detail: &TrancheDetail) -> AppResult<String> {
    let tranche = &detail.tranche;

    let chart = if detail.holders.is_empty() {
        String::new()
    } else {
        let title = format!("Holders of Tranche: {}", tranche.id);
        holders_chart(&title, &title, &detail.holders).render(0)?
    };

    render(&TrancheTemplate {
        chart_script_url,
        id: tranche.id,
        bond: tranche.bond,
        symbol: &detail.token.symbol,
        total_collateral: tranche.total_collateral.to_string(),
        ratio: tranche.ratio.to_string(),
        index: tranche.index,
        chart,
        holders: holder_accounts(&detail.holders),
    })
}

pub fn account_page(chart_script_url: &str, detail: &AccountDetail) -> AppResult<String> {
    let mut ordinal = 0;
    let rows = detail
        .balances
        .iter()
        .map(|entry| match entry {
            BalanceEntry::Resolved(balance) => {
                let row = BalanceRow {
                    ordinal,
                    resolved: true,
                    tranche: balance.tranche.to_checksum(),
                    symbol: balance.token_symbol.clone(),
                    amount: balance.amount.clone(),
                    problem: String::new(),
                };
                ordinal += 1;
                row
            }
            BalanceEntry::Unresolved { problem, .. } => BalanceRow {
                ordinal,
                resolved: false,
                tranche: String::new(),
                symbol: String::new(),
                amount: String::new(),
                problem: problem.clone(),
            },
        })
        .collect();

    render(&AccountTemplate {
        chart_script_url,
        id: detail.account,
        rows,
    })
}

/// Error page; falls back to plain text if the template itself fails
pub fn error_page(status: StatusCode, message: &str) -> String {
    let template = ErrorTemplate {
        chart_script_url: "",
        code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
    };
    template
        .render()
        .unwrap_or_else(|_| format!("ERROR: {}", message))
}
