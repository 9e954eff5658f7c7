//! Expected cost and payout of a fixed daily betting plan.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, draw::GameVariant};

/// Prize for a one-unit straight bet, with and without the bonus multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutTable {
  pub straight: f64,
  /// Added to `straight` when the bonus multiplier was bought.
  pub bonus:    f64,
}

impl PayoutTable {
  pub fn for_variant(variant: GameVariant) -> Self {
    match variant {
      GameVariant::ThreeDigit => Self { straight: 500.0, bonus: 100.0 },
      GameVariant::FourDigit => Self { straight: 5_000.0, bonus: 750.0 },
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiParams {
  pub variant:                  GameVariant,
  pub bet_amount:               f64,
  #[serde(default)]
  pub include_bonus_multiplier: bool,
  pub plays_per_day:            u32,
  pub horizon_days:             u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiCalculation {
  pub cost_per_play:   f64,
  pub daily_cost:      f64,
  pub total_spend:     f64,
  pub payout:          f64,
  pub net_profit:      f64,
  /// Days of play whose cost equals one win; `None` if nothing is spent.
  pub break_even_days: Option<u64>,
}

impl RoiParams {
  pub fn validate(&self) -> Result<()> {
    if !(self.bet_amount.is_finite() && self.bet_amount > 0.0) {
      return Err(Error::InvalidRoi(format!(
        "bet amount must be positive, got {}",
        self.bet_amount
      )));
    }
    if self.plays_per_day == 0 {
      return Err(Error::InvalidRoi("plays per day must be at least 1".into()));
    }
    if self.horizon_days == 0 {
      return Err(Error::InvalidRoi("horizon must be at least 1 day".into()));
    }
    Ok(())
  }
}

/// Closed-form cost/payout arithmetic for `params`.
pub fn calculate(params: &RoiParams) -> Result<RoiCalculation> {
  params.validate()?;
  let table = PayoutTable::for_variant(params.variant);

  let multiplier = if params.include_bonus_multiplier { 2.0 } else { 1.0 };
  let cost_per_play = params.bet_amount * multiplier;
  let daily_cost = cost_per_play * f64::from(params.plays_per_day);
  let total_spend = daily_cost * f64::from(params.horizon_days);

  let per_unit = if params.include_bonus_multiplier {
    table.straight + table.bonus
  } else {
    table.straight
  };
  let payout = per_unit * params.bet_amount;
  let net_profit = payout - total_spend;

  if ![cost_per_play, daily_cost, total_spend, payout, net_profit]
    .iter()
    .all(|v| v.is_finite())
  {
    return Err(Error::InvalidRoi(format!(
      "bet amount {} overflows the plan totals",
      params.bet_amount
    )));
  }

  let break_even_days =
    (daily_cost > 0.0).then(|| (payout / daily_cost).ceil() as u64);

  Ok(RoiCalculation {
    cost_per_play,
    daily_cost,
    total_spend,
    payout,
    net_profit,
    break_even_days,
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn params(bet: f64, bonus: bool) -> RoiParams {
    RoiParams {
      variant:                  GameVariant::FourDigit,
      bet_amount:               bet,
      include_bonus_multiplier: bonus,
      plays_per_day:            2,
      horizon_days:             30,
    }
  }

  #[test]
  fn four_digit_straight_plan() {
    let roi = calculate(&params(1.0, false)).unwrap();
    assert_eq!(roi.cost_per_play, 1.0);
    assert_eq!(roi.daily_cost, 2.0);
    assert_eq!(roi.total_spend, 60.0);
    assert_eq!(roi.payout, 5_000.0);
    assert_eq!(roi.net_profit, 4_940.0);
    assert_eq!(roi.break_even_days, Some(2_500));
  }

  #[test]
  fn bonus_doubles_cost_and_adds_prize() {
    let roi = calculate(&params(0.5, true)).unwrap();
    assert_eq!(roi.cost_per_play, 1.0);
    assert_eq!(roi.daily_cost, 2.0);
    assert_eq!(roi.payout, 2_875.0);
    assert_eq!(roi.break_even_days, Some(1_438));
  }

  #[test]
  fn three_digit_table() {
    let mut p = params(1.0, false);
    p.variant = GameVariant::ThreeDigit;
    let roi = calculate(&p).unwrap();
    assert_eq!(roi.payout, 500.0);
    assert_eq!(roi.break_even_days, Some(250));
  }

  #[test]
  fn rejects_non_positive_inputs() {
    assert!(matches!(calculate(&params(0.0, false)), Err(Error::InvalidRoi(_))));
    assert!(matches!(calculate(&params(-1.0, false)), Err(Error::InvalidRoi(_))));
    assert!(matches!(calculate(&params(f64::NAN, false)), Err(Error::InvalidRoi(_))));

    let mut p = params(1.0, false);
    p.plays_per_day = 0;
    assert!(calculate(&p).is_err());

    let mut p = params(1.0, false);
    p.horizon_days = 0;
    assert!(calculate(&p).is_err());
  }

  #[test]
  fn overflowing_totals_are_rejected() {
    let err = calculate(&params(1e308, false)).unwrap_err();
    assert!(matches!(err, Error::InvalidRoi(_)));
    assert!(err.is_validation());

    // Doubling for the bonus alone is enough to leave the f64 range.
    assert!(matches!(calculate(&params(f64::MAX, true)), Err(Error::InvalidRoi(_))));

    // Large but representable plans still compute.
    let roi = calculate(&params(1e12, false)).unwrap();
    assert!(roi.net_profit.is_finite());
  }
}
