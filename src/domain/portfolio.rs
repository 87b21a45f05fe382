//! Portfolio state, trading and valuation against a price series.

use std::collections::BTreeMap;
use std::fmt;

use super::error::StockError;
use super::price_series::PriceSeries;

/// Relative slack allowed when a buy spends the last of the cash.
const CASH_TOLERANCE: f64 = 1e-9;
/// Slack allowed when a sell empties a holding.
const SHARE_TOLERANCE: f64 = 1e-9;

/// Round to two decimal places, as stored for shares and ledger prices.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => write!(f, "BUY"),
            Action::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub action: Action,
    pub team: String,
    pub week: u32,
    pub amount: f64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    cash: f64,
    starting_cash: f64,
    holdings: BTreeMap<String, f64>,
    ledger: Vec<Transaction>,
}

impl Portfolio {
    pub fn new(starting_cash: f64) -> Self {
        Portfolio {
            cash: starting_cash,
            starting_cash,
            holdings: BTreeMap::new(),
            ledger: Vec::new(),
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn starting_cash(&self) -> f64 {
        self.starting_cash
    }

    pub fn shares(&self, team: &str) -> f64 {
        self.holdings.get(team).copied().unwrap_or(0.0)
    }

    pub fn holdings(&self) -> &BTreeMap<String, f64> {
        &self.holdings
    }

    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    /// Spend `amount` of cash on `team` at its `week` price.
    ///
    /// Returns the number of shares bought. On any error the portfolio is
    /// left untouched.
    pub fn buy(
        &mut self,
        series: &PriceSeries,
        team: &str,
        week: u32,
        amount: f64,
    ) -> Result<f64, StockError> {
        validate_amount(amount)?;
        let slack = CASH_TOLERANCE * amount.max(self.cash).max(1.0);
        if amount - self.cash > slack {
            return Err(StockError::InsufficientFunds {
                requested: amount,
                available: self.cash,
            });
        }
        let price = series.price(team, week)?;
        let shares = round2(amount / price);

        *self.holdings.entry(team.to_string()).or_insert(0.0) += shares;
        self.cash = (self.cash - amount).max(0.0);
        self.record(Action::Buy, team, week, amount, price);

        tracing::debug!(team, week, amount, price, shares, "buy");
        Ok(shares)
    }

    /// Sell `amount` worth of `team` at its `week` price.
    ///
    /// Returns the number of shares sold. Selling a team that is not held,
    /// or more shares than are held, fails without touching state.
    pub fn sell(
        &mut self,
        series: &PriceSeries,
        team: &str,
        week: u32,
        amount: f64,
    ) -> Result<f64, StockError> {
        validate_amount(amount)?;
        let Some(&held) = self.holdings.get(team) else {
            return Err(StockError::InsufficientHoldings {
                team: team.to_string(),
                requested: amount,
                held: 0.0,
            });
        };
        let price = series.price(team, week)?;
        let shares = round2(amount / price);
        if shares > held + SHARE_TOLERANCE {
            return Err(StockError::InsufficientHoldings {
                team: team.to_string(),
                requested: shares,
                held,
            });
        }

        let remaining = held - shares;
        if remaining.abs() <= SHARE_TOLERANCE {
            self.holdings.remove(team);
        } else {
            self.holdings.insert(team.to_string(), remaining);
        }
        self.cash += amount;
        self.record(Action::Sell, team, week, amount, price);

        tracing::debug!(team, week, amount, price, shares, "sell");
        Ok(shares)
    }

    /// Cash plus the market value of every holding in `week`.
    pub fn value(&self, series: &PriceSeries, week: u32) -> Result<f64, StockError> {
        let mut holdings_value = 0.0;
        for (team, shares) in &self.holdings {
            holdings_value += shares * series.price(team, week)?;
        }
        Ok(self.cash + holdings_value)
    }

    fn record(&mut self, action: Action, team: &str, week: u32, amount: f64, price: f64) {
        self.ledger.push(Transaction {
            action,
            team: team.to_string(),
            week,
            amount,
            unit_price: round2(price),
        });
    }
}

fn validate_amount(amount: f64) -> Result<(), StockError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(StockError::InvalidAmount { amount });
    }
    Ok(())
}
