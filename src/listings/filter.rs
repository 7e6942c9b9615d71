use crate::track::Unit;

/// A unit is listed only when the PMS flags it active with a literal `true`
pub fn is_active(unit: &Unit) -> bool {
    unit.is_active == Some(true)
}

/// Keep active units, preserving order
pub fn active_units(units: Vec<Unit>) -> Vec<Unit> {
    units.into_iter().filter(is_active).collect()
}
