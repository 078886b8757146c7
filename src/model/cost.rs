use serde::{Deserialize, Serialize};

/// Name given to a migrated legacy garbage fee
pub const LEGACY_GARBAGE_SERVICE: &str = "Rác";

/// A named flat monthly fee, in thousands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCost {
    pub name: String,
    pub fee: f64,
}

impl ServiceCost {
    pub fn new(name: impl Into<String>, fee: f64) -> Self {
        Self {
            name: name.into(),
            fee,
        }
    }
}

/// A bundle of unit prices plus flat fees, chosen per billing run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostSet {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub electricity_cost: f64,
    #[serde(default)]
    pub water_cost: f64,
    pub service_costs: Vec<ServiceCost>,
}

impl CostSet {
    pub fn new(id: u64, name: impl Into<String>, electricity_cost: f64, water_cost: f64) -> Self {
        Self {
            id,
            name: name.into(),
            electricity_cost,
            water_cost,
            service_costs: Vec::new(),
        }
    }

    pub fn with_service(mut self, name: impl Into<String>, fee: f64) -> Self {
        self.service_costs.push(ServiceCost::new(name, fee));
        self
    }

    /// Sum of all flat fees
    pub fn services_total(&self) -> f64 {
        self.service_costs.iter().map(|s| s.fee).sum()
    }
}

/// Cost set written before flat fees were generalized: a single garbage fee
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCostSet {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub electricity_cost: f64,
    #[serde(default)]
    pub water_cost: f64,
    #[serde(default)]
    pub garbage_cost: Option<f64>,
}

/// A cost set as found in a ledger file, in either schema.
///
/// Only exists at the load boundary; call [`StoredCostSet::upgrade`] once and
/// work with [`CostSet`] from then on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StoredCostSet {
    /// Has `serviceCosts`; a stray `garbageCost` alongside it is ignored
    Current(CostSet),
    Legacy(LegacyCostSet),
}

impl StoredCostSet {
    pub fn is_legacy(&self) -> bool {
        matches!(self, StoredCostSet::Legacy(_))
    }

    pub fn upgrade(self) -> CostSet {
        match self {
            StoredCostSet::Current(set) => set,
            StoredCostSet::Legacy(legacy) => CostSet {
                id: legacy.id,
                name: legacy.name,
                electricity_cost: legacy.electricity_cost,
                water_cost: legacy.water_cost,
                service_costs: legacy
                    .garbage_cost
                    .map(|fee| vec![ServiceCost::new(LEGACY_GARBAGE_SERVICE, fee)])
                    .unwrap_or_default(),
            },
        }
    }
}
