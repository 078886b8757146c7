pub mod charges;
pub mod cost;
pub mod ledger;
pub mod room;

pub use charges::{
    ceil_units, compute_charges, compute_charges_with, round_up_to_thousand, ChargeBreakdown,
    WaterRounding, MINOR_PER_UNIT,
};
pub use cost::{CostSet, LegacyCostSet, ServiceCost, StoredCostSet, LEGACY_GARBAGE_SERVICE};
pub use ledger::{InvoiceSettings, Ledger, DEFAULT_INVOICE_REMARKS, LEDGER_VERSION};
pub use room::{compare_rooms, group_by_block, sort_rooms, BlockGroup, Room};
