//! Knapsack instance: capacity plus an immutable item table.

use crate::error::{KnapsackError, Result};
use std::cmp::Ordering;

/// A single item identified by its position in the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Value gained when the item is packed.
    pub value: u64,
    /// Capacity consumed when the item is packed.
    pub weight: u64,
}

impl Item {
    /// Creates an item.
    pub fn new(value: u64, weight: u64) -> Self {
        Self { value, weight }
    }

    /// Compares value/weight ratios exactly.
    ///
    /// Cross-multiplies in `u128`, so no precision is lost. A zero-weight
    /// item has an infinite ratio and compares greater than any weighted
    /// item; two zero-weight items compare equal.
    pub fn cmp_ratio(&self, other: &Item) -> Ordering {
        match (self.weight, other.weight) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Greater,
            (_, 0) => Ordering::Less,
            _ => {
                let lhs = self.value as u128 * other.weight as u128;
                let rhs = other.value as u128 * self.weight as u128;
                lhs.cmp(&rhs)
            }
        }
    }

    /// Value per unit of weight, for display and logging.
    pub fn ratio(&self) -> f64 {
        if self.weight == 0 {
            f64::INFINITY
        } else {
            self.value as f64 / self.weight as f64
        }
    }
}

/// A validated 0/1 knapsack instance.
///
/// Built once and read-only afterwards. Construction guarantees that the
/// sum of all values and the sum of all weights fit in a `u64`, so any
/// subset sum computed by the solvers cannot overflow.
///
/// # Examples
///
/// ```
/// use u_knapsack::model::ProblemInstance;
///
/// let instance = ProblemInstance::load(11, &[(8, 4), (10, 5), (15, 8), (4, 3)]).unwrap();
/// assert_eq!(instance.len(), 4);
/// assert_eq!(instance.capacity(), 11);
/// assert!(ProblemInstance::load(-1, &[(1, 1)]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawInstance"))]
pub struct ProblemInstance {
    capacity: u64,
    items: Vec<Item>,
}

/// Unchecked wire form of [`ProblemInstance`]; deserialization goes through
/// [`ProblemInstance::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawInstance {
    capacity: u64,
    items: Vec<Item>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawInstance> for ProblemInstance {
    type Error = KnapsackError;

    fn try_from(raw: RawInstance) -> Result<Self> {
        Self::new(raw.capacity, raw.items)
    }
}

impl ProblemInstance {
    /// Loads an instance from signed `(value, weight)` pairs.
    ///
    /// # Errors
    /// [`KnapsackError::InvalidInstance`] if the capacity or any value or
    /// weight is negative, or if the totals overflow `u64`.
    pub fn load(capacity: i64, items: &[(i64, i64)]) -> Result<Self> {
        let capacity = u64::try_from(capacity).map_err(|_| {
            KnapsackError::InvalidInstance(format!("capacity must be non-negative, got {capacity}"))
        })?;

        let items = items
            .iter()
            .enumerate()
            .map(|(i, &(value, weight))| {
                let value = u64::try_from(value).map_err(|_| {
                    KnapsackError::InvalidInstance(format!(
                        "item {i}: value must be non-negative, got {value}"
                    ))
                })?;
                let weight = u64::try_from(weight).map_err(|_| {
                    KnapsackError::InvalidInstance(format!(
                        "item {i}: weight must be non-negative, got {weight}"
                    ))
                })?;
                Ok(Item::new(value, weight))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(capacity, items)
    }

    /// Builds an instance from unsigned items.
    ///
    /// # Errors
    /// [`KnapsackError::InvalidInstance`] if the value or weight totals
    /// overflow `u64`.
    pub fn new(capacity: u64, items: Vec<Item>) -> Result<Self> {
        let mut total_value = 0u64;
        let mut total_weight = 0u64;
        for item in &items {
            total_value = total_value.checked_add(item.value).ok_or_else(|| {
                KnapsackError::InvalidInstance("sum of item values overflows u64".into())
            })?;
            total_weight = total_weight.checked_add(item.weight).ok_or_else(|| {
                KnapsackError::InvalidInstance("sum of item weights overflows u64".into())
            })?;
        }
        Ok(Self { capacity, items })
    }

    /// Builds an instance from parallel value and weight slices.
    ///
    /// # Errors
    /// [`KnapsackError::InvalidInstance`] if the slices differ in length or
    /// the totals overflow.
    pub fn from_values_weights(capacity: u64, values: &[u64], weights: &[u64]) -> Result<Self> {
        if values.len() != weights.len() {
            return Err(KnapsackError::InvalidInstance(format!(
                "{} values but {} weights",
                values.len(),
                weights.len()
            )));
        }
        let items = values
            .iter()
            .zip(weights)
            .map(|(&v, &w)| Item::new(v, w))
            .collect();
        Self::new(capacity, items)
    }

    /// Knapsack capacity.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// All items in original order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Item at original index `i`.
    pub fn item(&self, i: usize) -> Item {
        self.items[i]
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the instance has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Size of the DP state space, `n × capacity`, saturating.
    pub fn state_space(&self) -> u64 {
        (self.items.len() as u64).saturating_mul(self.capacity)
    }

    /// Sum of values of the given item indices.
    pub fn value_of<'a, I>(&self, indices: I) -> u64
    where
        I: IntoIterator<Item = &'a usize>,
    {
        indices.into_iter().map(|&i| self.items[i].value).sum()
    }

    /// Sum of weights of the given item indices.
    pub fn weight_of<'a, I>(&self, indices: I) -> u64
    where
        I: IntoIterator<Item = &'a usize>,
    {
        indices.into_iter().map(|&i| self.items[i].weight).sum()
    }

    /// Item indices sorted by descending value/weight ratio.
    ///
    /// Ties keep original order.
    pub fn ratio_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.items.len()).collect();
        order.sort_by(|&a, &b| self.items[b].cmp_ratio(&self.items[a]));
        order
    }

    /// Greatest common divisor of all weights (0 when there are none, or
    /// all are zero).
    pub fn weight_gcd(&self) -> u64 {
        self.items.iter().fold(0, |g, item| gcd(g, item.weight))
    }

    /// Divides every weight and the capacity by the weight GCD.
    ///
    /// Every subset weight is a multiple of `g`, so `sum ≤ capacity` holds
    /// exactly when `sum / g ≤ capacity / g` (floor division). Item indices
    /// are unchanged; the mapping back is the identity.
    pub fn reduce_by_gcd(&self) -> GcdReduction {
        let divisor = self.weight_gcd();
        if divisor <= 1 {
            return GcdReduction {
                instance: self.clone(),
                divisor: 1,
            };
        }
        let items = self
            .items
            .iter()
            .map(|item| Item::new(item.value, item.weight / divisor))
            .collect();
        GcdReduction {
            instance: Self {
                capacity: self.capacity / divisor,
                items,
            },
            divisor,
        }
    }

    /// Whether the given item indices fit in the knapsack.
    ///
    /// Rejects out-of-range and repeated indices.
    pub fn is_feasible(&self, indices: &[usize]) -> bool {
        let mut seen = vec![false; self.items.len()];
        let mut weight = 0u64;
        for &i in indices {
            if i >= self.items.len() || seen[i] {
                return false;
            }
            seen[i] = true;
            weight += self.items[i].weight;
        }
        weight <= self.capacity
    }

    /// Converts a set of chosen indices to a per-item 0/1 vector.
    pub fn assignment(&self, indices: &[usize]) -> Vec<u8> {
        let mut taken = vec![0u8; self.items.len()];
        for &i in indices {
            taken[i] = 1;
        }
        taken
    }
}

/// Output of [`ProblemInstance::reduce_by_gcd`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcdReduction {
    /// The reduced instance. Indices match the original.
    pub instance: ProblemInstance,
    /// The divisor applied; 1 when no reduction happened.
    pub divisor: u64,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
