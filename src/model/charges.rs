//! Billing calculator
//!
//! Turns a room's meter readings and the active cost set into the figures
//! printed on every document. All line items are in thousands of the local
//! currency; only the grand total is in minor units.

use serde::{Deserialize, Serialize};

use super::cost::CostSet;
use super::room::Room;

/// Slack allowed when rounding up, so floating-point noise such as
/// `10.0 * 0.3 == 3.0000000000000004` does not add a whole unit
const ROUNDING_EPSILON: f64 = 1e-9;

/// Minor currency units per thousand-unit
pub const MINOR_PER_UNIT: f64 = 1000.0;

/// How the water charge is rounded.
///
/// Electricity is always rounded up to a whole unit while water historically
/// is not. `Exact` keeps that behaviour; `RoundUp` treats both alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WaterRounding {
    #[default]
    Exact,
    RoundUp,
}

/// Charges for one room in one billing run
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeBreakdown {
    pub electric_usage: f64,
    pub water_usage: f64,
    /// Whole thousands, rounded up
    pub electricity: f64,
    /// Thousands; rounded up only under [`WaterRounding::RoundUp`]
    pub water: f64,
    pub services: f64,
    pub rent: f64,
    /// Sum of the four line items, in thousands
    pub subtotal: f64,
    /// Minor units, always a multiple of 1000 and never below the subtotal
    pub grand_total: i64,
}

impl ChargeBreakdown {
    /// Grand total expressed in thousands
    pub fn grand_total_units(&self) -> i64 {
        self.grand_total / 1000
    }
}

/// Round up to the next whole unit, ignoring float noise below 1e-9.
///
/// The result is never below `value` by more than 1e-9: an excess of at most
/// 1e-9 over a whole number rounds down to it, so `10.0 * 0.3` gives `3.0`.
/// Anything larger rounds up as usual.
pub fn ceil_units(value: f64) -> f64 {
    // `+ 0.0` turns a -0.0 from ceil(-tiny) into 0.0
    (value - ROUNDING_EPSILON).ceil() + 0.0
}

/// Round a minor-unit amount up to the next multiple of 1000
pub fn round_up_to_thousand(minor: f64) -> i64 {
    (ceil_units(minor / MINOR_PER_UNIT) * MINOR_PER_UNIT) as i64
}

/// Compute the charges for a room with the default water rounding
pub fn compute_charges(room: &Room, cost_set: &CostSet) -> ChargeBreakdown {
    compute_charges_with(room, cost_set, WaterRounding::Exact)
}

/// Compute the charges for a room.
///
/// Readings are not validated: a current reading below the previous one gives
/// a negative usage and a negative charge.
pub fn compute_charges_with(
    room: &Room,
    cost_set: &CostSet,
    water_rounding: WaterRounding,
) -> ChargeBreakdown {
    let electric_usage = room.electric_usage();
    let water_usage = room.water_usage();

    if electric_usage < 0.0 || water_usage < 0.0 {
        log::warn!(
            "Room {} has a negative meter usage (electric {}, water {})",
            room.room_name,
            electric_usage,
            water_usage
        );
    }

    let electricity = ceil_units(electric_usage * cost_set.electricity_cost);
    let water = match water_rounding {
        WaterRounding::Exact => water_usage * cost_set.water_cost,
        WaterRounding::RoundUp => ceil_units(water_usage * cost_set.water_cost),
    };
    let services = cost_set.services_total();
    let rent = room.room_price;

    let subtotal = electricity + water + services + rent;
    let grand_total = round_up_to_thousand(subtotal * MINOR_PER_UNIT);

    ChargeBreakdown {
        electric_usage,
        water_usage,
        electricity,
        water,
        services,
        rent,
        subtotal,
        grand_total,
    }
}
