//! statistics::attribute — exogenous node-attribute effects.
//!
//! Purpose
//! -------
//! Statistics that read a per-actor attribute table rather than the event
//! history: homophily, specific value combinations, numeric differences,
//! sums and products, sender/receiver main effects and categorical
//! indicators.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every actor has a value: unlisted actors read the table default.
//! - Numeric kinds (`Difference`, `Sum`, `Product`, `SenderMain`,
//!   `ReceiverMain`) are only constructible over tables whose values and
//!   default are all numeric.
//! - Tables are shared behind an `Arc`, so cloning a statistic is cheap and
//!   statistics stay `Send + Sync`.
use crate::events::{event::ActorId, time::EventTime};
use crate::network::state::NetworkState;
use crate::statistics::{
    errors::{StatError, StatResult},
    statistic::ComputeStatistic,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// One attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Numeric(f64),
    Categorical(String),
}

impl AttributeValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Numeric(x) => Some(*x),
            AttributeValue::Categorical(_) => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Numeric(x) => write!(f, "{x}"),
            AttributeValue::Categorical(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(x: f64) -> Self {
        AttributeValue::Numeric(x)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::Categorical(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::Categorical(s)
    }
}

/// AttributeTable — named per-actor values with a default.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeTable {
    name: String,
    values: HashMap<ActorId, AttributeValue>,
    default: AttributeValue,
}

impl AttributeTable {
    pub fn new(name: impl Into<String>, default: impl Into<AttributeValue>) -> Self {
        AttributeTable { name: name.into(), values: HashMap::new(), default: default.into() }
    }

    /// Set the value of one actor (builder style).
    pub fn with_value(mut self, actor: ActorId, value: impl Into<AttributeValue>) -> Self {
        self.values.insert(actor, value.into());
        self
    }

    pub fn insert(&mut self, actor: ActorId, value: impl Into<AttributeValue>) {
        self.values.insert(actor, value.into());
    }

    /// Build a table from `(actor, value)` pairs.
    pub fn from_pairs<V: Into<AttributeValue>>(
        name: impl Into<String>, default: impl Into<AttributeValue>,
        pairs: impl IntoIterator<Item = (ActorId, V)>,
    ) -> Self {
        let mut table = AttributeTable::new(name, default);
        for (actor, value) in pairs {
            table.insert(actor, value);
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of `actor`, or the default when unlisted.
    pub fn get(&self, actor: ActorId) -> &AttributeValue {
        self.values.get(&actor).unwrap_or(&self.default)
    }

    fn numeric(&self, actor: ActorId) -> f64 {
        self.get(actor).as_f64().unwrap_or(f64::NAN)
    }

    /// Reject tables holding any categorical value.
    fn require_numeric(&self) -> StatResult<()> {
        if self.default.as_f64().is_none() {
            return Err(StatError::NonNumericAttribute { table: self.name.clone(), actor: None });
        }
        let mut offending: Vec<ActorId> = self
            .values
            .iter()
            .filter(|(_, v)| v.as_f64().is_none())
            .map(|(&a, _)| a)
            .collect();
        offending.sort_unstable();
        match offending.first() {
            Some(&actor) => {
                Err(StatError::NonNumericAttribute { table: self.name.clone(), actor: Some(actor) })
            }
            None => Ok(()),
        }
    }
}

/// AttributeKind — how sender and receiver values combine.
///
/// Variants
/// --------
/// - `Match`: `1` if both values are equal (homophily).
/// - `Combination { sender, receiver }`: `1` if the sender holds `sender`
///   and the receiver holds `receiver`.
/// - `Difference { absolute }`: `x_s − x_r`, or `|x_s − x_r|`.
/// - `Sum`, `Product`: `x_s + x_r`, `x_s · x_r`.
/// - `SenderMain`, `ReceiverMain`: `x_s`, `x_r`.
/// - `SenderIs(v)`, `ReceiverIs(v)`: `1` if the sender (receiver) holds `v`.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeKind {
    Match,
    Combination { sender: AttributeValue, receiver: AttributeValue },
    Difference { absolute: bool },
    Sum,
    Product,
    SenderMain,
    ReceiverMain,
    SenderIs(AttributeValue),
    ReceiverIs(AttributeValue),
}

impl AttributeKind {
    fn is_numeric(&self) -> bool {
        matches!(
            self,
            AttributeKind::Difference { .. }
                | AttributeKind::Sum
                | AttributeKind::Product
                | AttributeKind::SenderMain
                | AttributeKind::ReceiverMain
        )
    }
}

fn indicator(flag: bool) -> f64 {
    if flag { 1.0 } else { 0.0 }
}

/// NodeAttribute — one attribute effect over one table.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeAttribute {
    table: Arc<AttributeTable>,
    kind: AttributeKind,
}

impl NodeAttribute {
    /// # Errors
    /// [`StatError::NonNumericAttribute`] when a numeric kind is built over a
    /// table holding categorical values.
    pub fn new(table: impl Into<Arc<AttributeTable>>, kind: AttributeKind) -> StatResult<Self> {
        let table = table.into();
        if kind.is_numeric() {
            table.require_numeric()?;
        }
        Ok(NodeAttribute { table, kind })
    }

    pub fn table(&self) -> &AttributeTable {
        &self.table
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }
}

impl ComputeStatistic for NodeAttribute {
    fn compute<T: EventTime>(
        &self, _state: &NetworkState<T>, sender: ActorId, receiver: ActorId,
    ) -> StatResult<f64> {
        let table = &self.table;
        let value = match &self.kind {
            AttributeKind::Match => indicator(table.get(sender) == table.get(receiver)),
            AttributeKind::Combination { sender: vs, receiver: vr } => {
                indicator(table.get(sender) == vs && table.get(receiver) == vr)
            }
            AttributeKind::Difference { absolute } => {
                let d = table.numeric(sender) - table.numeric(receiver);
                if *absolute { d.abs() } else { d }
            }
            AttributeKind::Sum => table.numeric(sender) + table.numeric(receiver),
            AttributeKind::Product => table.numeric(sender) * table.numeric(receiver),
            AttributeKind::SenderMain => table.numeric(sender),
            AttributeKind::ReceiverMain => table.numeric(receiver),
            AttributeKind::SenderIs(v) => indicator(table.get(sender) == v),
            AttributeKind::ReceiverIs(v) => indicator(table.get(receiver) == v),
        };
        Ok(value)
    }

    fn default_name(&self) -> String {
        let name = self.table.name();
        match &self.kind {
            AttributeKind::Match => format!("match_{name}"),
            AttributeKind::Combination { sender, receiver } => {
                format!("{name}_{sender}_to_{receiver}")
            }
            AttributeKind::Difference { absolute: false } => format!("diff_{name}"),
            AttributeKind::Difference { absolute: true } => format!("absdiff_{name}"),
            AttributeKind::Sum => format!("sum_{name}"),
            AttributeKind::Product => format!("product_{name}"),
            AttributeKind::SenderMain => format!("sender_{name}"),
            AttributeKind::ReceiverMain => format!("receiver_{name}"),
            AttributeKind::SenderIs(v) => format!("sender_{name}_{v}"),
            AttributeKind::ReceiverIs(v) => format!("receiver_{name}_{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Every attribute kind on a small numeric and a categorical table.
    // - Default values for unlisted actors.
    // - Rejection of numeric kinds over categorical tables.
    // -------------------------------------------------------------------------

    fn age() -> AttributeTable {
        AttributeTable::from_pairs("age", 0.0, [(1, 30.0), (2, 45.0)])
    }

    fn team() -> AttributeTable {
        AttributeTable::new("team", "none").with_value(1, "red").with_value(2, "blue").with_value(3, "red")
    }

    fn eval(table: AttributeTable, kind: AttributeKind, s: ActorId, r: ActorId) -> f64 {
        let state: NetworkState<f64> = NetworkState::without_decay();
        NodeAttribute::new(table, kind).unwrap().compute(&state, s, r).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Numeric kinds follow their arithmetic; unlisted actors use the default.
    //
    // Given
    // -----
    // - age: 1 → 30, 2 → 45, default 0.
    //
    // Expect
    // ------
    // - diff(1,2) = -15, absdiff = 15, sum = 75, product = 1350,
    //   sender main = 30, receiver main (9) = 0.
    fn numeric_kinds() {
        assert_eq!(eval(age(), AttributeKind::Difference { absolute: false }, 1, 2), -15.0);
        assert_eq!(eval(age(), AttributeKind::Difference { absolute: true }, 1, 2), 15.0);
        assert_eq!(eval(age(), AttributeKind::Sum, 1, 2), 75.0);
        assert_eq!(eval(age(), AttributeKind::Product, 1, 2), 1350.0);
        assert_eq!(eval(age(), AttributeKind::SenderMain, 1, 2), 30.0);
        assert_eq!(eval(age(), AttributeKind::ReceiverMain, 1, 9), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Indicator kinds compare values for equality.
    //
    // Given
    // -----
    // - team: 1 → red, 2 → blue, 3 → red, default "none".
    //
    // Expect
    // ------
    // - match(1,3) = 1, match(1,2) = 0, red→blue combination on (1,2) = 1,
    //   sender is red on (3,2) = 1, receiver is "none" on (1,8) = 1.
    fn indicator_kinds() {
        assert_eq!(eval(team(), AttributeKind::Match, 1, 3), 1.0);
        assert_eq!(eval(team(), AttributeKind::Match, 1, 2), 0.0);
        let combo = AttributeKind::Combination { sender: "red".into(), receiver: "blue".into() };
        assert_eq!(eval(team(), combo.clone(), 1, 2), 1.0);
        assert_eq!(eval(team(), combo, 2, 1), 0.0);
        assert_eq!(eval(team(), AttributeKind::SenderIs("red".into()), 3, 2), 1.0);
        assert_eq!(eval(team(), AttributeKind::ReceiverIs("none".into()), 1, 8), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Numeric kinds over categorical data are configuration errors.
    //
    // Given
    // -----
    // - The categorical team table; a numeric table with a categorical entry.
    //
    // Expect
    // ------
    // - `NonNumericAttribute` naming the default or the offending actor.
    fn numeric_kind_rejects_categorical_table() {
        let err = NodeAttribute::new(team(), AttributeKind::Sum).unwrap_err();
        assert_eq!(err, StatError::NonNumericAttribute { table: "team".into(), actor: None });

        let mixed = age().with_value(7, "unknown");
        let err = NodeAttribute::new(mixed, AttributeKind::SenderMain).unwrap_err();
        assert_eq!(err, StatError::NonNumericAttribute { table: "age".into(), actor: Some(7) });

        assert!(NodeAttribute::new(team(), AttributeKind::Match).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Default names encode the kind and table.
    //
    // Given
    // -----
    // - Several kinds over "age" and "team".
    //
    // Expect
    // ------
    // - Deterministic names.
    fn default_names() {
        let name = |t: AttributeTable, k: AttributeKind| NodeAttribute::new(t, k).unwrap().default_name();
        assert_eq!(name(team(), AttributeKind::Match), "match_team");
        assert_eq!(name(age(), AttributeKind::Difference { absolute: true }), "absdiff_age");
        assert_eq!(name(team(), AttributeKind::SenderIs("red".into())), "sender_team_red");
    }
}
