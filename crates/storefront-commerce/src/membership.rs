//! Membership tiers and their pricing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Membership level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipTier {
    Basic,
    Vip,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 2] = [MembershipTier::Basic, MembershipTier::Vip];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipTier::Basic => "basic",
            MembershipTier::Vip => "vip",
        }
    }

    /// Identifier the plan carries as a checkout line.
    pub fn product_id(&self) -> ProductId {
        ProductId::new(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Ok(MembershipTier::Basic),
            "vip" => Ok(MembershipTier::Vip),
            _ => Err(CommerceError::unknown("membership tier", s)),
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often a membership is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Annual,
}

impl BillingPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Annual => "annual",
        }
    }

    /// The other period, as flipped by the billing toggle.
    pub fn toggled(&self) -> Self {
        match self {
            BillingPeriod::Monthly => BillingPeriod::Annual,
            BillingPeriod::Annual => BillingPeriod::Monthly,
        }
    }
}

impl FromStr for BillingPeriod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(BillingPeriod::Monthly),
            "annual" => Ok(BillingPeriod::Annual),
            _ => Err(CommerceError::unknown("billing period", s)),
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature row on a plan card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeature {
    pub name: String,
    pub included: bool,
}

/// What a yearly subscriber saves over twelve monthly payments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savings {
    pub amount: Money,
    /// Whole percent, rounded half up.
    pub percentage: i64,
}

/// A purchasable membership plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub tier: MembershipTier,
    pub name: String,
    pub description: String,
    pub monthly_price: Money,
    pub annual_price: Money,
    pub features: Vec<PlanFeature>,
    /// Highlighted as the recommended plan.
    pub popular: bool,
}

impl MembershipPlan {
    /// The standard plan for `tier`, priced in `currency`.
    pub fn builtin(tier: MembershipTier, currency: Currency) -> Self {
        let features = |rows: &[(&str, bool)]| -> Vec<PlanFeature> {
            rows.iter()
                .map(|(name, included)| PlanFeature {
                    name: name.to_string(),
                    included: *included,
                })
                .collect()
        };

        match tier {
            MembershipTier::Basic => Self {
                tier,
                name: "Basic Membership".to_string(),
                description: "Perfect for beginner mothers".to_string(),
                monthly_price: Money::from_major(99, currency),
                annual_price: Money::from_major(999, currency),
                features: features(&[
                    ("Access to 50 educational materials", true),
                    ("3 training courses", true),
                    ("Email support", true),
                    ("Completion certificates", true),
                    ("Access to all materials", false),
                    ("Live support", false),
                    ("Exclusive workshops", false),
                ]),
                popular: false,
            },
            MembershipTier::Vip => Self {
                tier,
                name: "VIP Membership".to_string(),
                description: "For advanced mothers and educators".to_string(),
                monthly_price: Money::from_major(199, currency),
                annual_price: Money::from_major(1999, currency),
                features: features(&[
                    ("Access to all educational materials", true),
                    ("All training courses", true),
                    ("24/7 live support", true),
                    ("Completion certificates", true),
                    ("Exclusive workshops", true),
                    ("Personal consultations", true),
                    ("New weekly content", true),
                ]),
                popular: true,
            },
        }
    }

    /// Every standard plan, cheapest first.
    pub fn all(currency: Currency) -> Vec<Self> {
        MembershipTier::ALL
            .into_iter()
            .map(|tier| Self::builtin(tier, currency))
            .collect()
    }

    pub fn price(&self, period: BillingPeriod) -> Money {
        match period {
            BillingPeriod::Monthly => self.monthly_price,
            BillingPeriod::Annual => self.annual_price,
        }
    }

    pub fn display_title(&self, period: BillingPeriod) -> String {
        match period {
            BillingPeriod::Monthly => format!("{} (Monthly)", self.name),
            BillingPeriod::Annual => format!("{} (Annual)", self.name),
        }
    }

    /// Savings of the annual price against twelve monthly payments.
    pub fn annual_savings(&self) -> Savings {
        let yearly_at_monthly = self.monthly_price.saturating_multiply(12);
        let amount = yearly_at_monthly
            .amount_minor
            .saturating_sub(self.annual_price.amount_minor);
        let base = yearly_at_monthly.amount_minor;
        let percentage = if base == 0 {
            0
        } else {
            // Round half up, matching how the plan cards present it.
            amount
                .saturating_mul(200)
                .saturating_add(base)
                .div_euclid(base.saturating_mul(2))
        };

        Savings {
            amount: Money::new(amount, self.monthly_price.currency),
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prices() {
        let basic = MembershipPlan::builtin(MembershipTier::Basic, Currency::SAR);
        assert_eq!(basic.price(BillingPeriod::Monthly), Money::from_major(99, Currency::SAR));
        assert_eq!(basic.price(BillingPeriod::Annual), Money::from_major(999, Currency::SAR));

        let vip = MembershipPlan::builtin(MembershipTier::Vip, Currency::SAR);
        assert_eq!(vip.price(BillingPeriod::Monthly), Money::from_major(199, Currency::SAR));
        assert_eq!(vip.price(BillingPeriod::Annual), Money::from_major(1999, Currency::SAR));
        assert!(vip.popular);
    }

    #[test]
    fn test_annual_savings() {
        let basic = MembershipPlan::builtin(MembershipTier::Basic, Currency::SAR);
        let savings = basic.annual_savings();
        assert_eq!(savings.amount, Money::from_major(189, Currency::SAR));
        assert_eq!(savings.percentage, 16);

        let vip = MembershipPlan::builtin(MembershipTier::Vip, Currency::SAR);
        let savings = vip.annual_savings();
        assert_eq!(savings.amount, Money::from_major(389, Currency::SAR));
        assert_eq!(savings.percentage, 16);
    }

    #[test]
    fn test_savings_percentage_rounds_half_up() {
        let mut plan = MembershipPlan::builtin(MembershipTier::Basic, Currency::SAR);
        plan.monthly_price = Money::new(100, Currency::SAR);
        // 1200 yearly, 1194 annual: 0.5% saved
        plan.annual_price = Money::new(1194, Currency::SAR);
        assert_eq!(plan.annual_savings().percentage, 1);
    }

    #[test]
    fn test_free_plan_has_no_savings() {
        let mut plan = MembershipPlan::builtin(MembershipTier::Basic, Currency::SAR);
        plan.monthly_price = Money::zero(Currency::SAR);
        plan.annual_price = Money::zero(Currency::SAR);
        assert_eq!(plan.annual_savings().percentage, 0);
    }

    #[test]
    fn test_parse_tier_and_period() {
        assert_eq!("VIP".parse::<MembershipTier>().unwrap(), MembershipTier::Vip);
        assert_eq!("annual".parse::<BillingPeriod>().unwrap(), BillingPeriod::Annual);
        assert!("gold".parse::<MembershipTier>().is_err());
        assert!("weekly".parse::<BillingPeriod>().is_err());
        assert_eq!(BillingPeriod::Monthly.toggled(), BillingPeriod::Annual);
    }

    #[test]
    fn test_all_plans_in_order() {
        let tiers: Vec<MembershipTier> = MembershipPlan::all(Currency::SAR)
            .iter()
            .map(|p| p.tier)
            .collect();
        assert_eq!(tiers, vec![MembershipTier::Basic, MembershipTier::Vip]);
    }
}
