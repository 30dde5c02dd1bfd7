use crate::constants::quarter_wave_thickness;
use crate::error::{Result, TmmError};
use crate::layer::{Layer, Medium};
use crate::stack::Stack;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};

/// A period template repeated a fixed number of times between two media.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicDesign {
    incident: Medium,
    exit: Medium,
    period: Vec<Layer>,
    periods: usize,
}

impl PeriodicDesign {
    pub fn new(incident: Medium, exit: Medium, period: Vec<Layer>, periods: usize) -> Self {
        Self {
            incident,
            exit,
            period,
            periods,
        }
    }

    /// Classic HL quarter-wave Bragg mirror: each period is a high-index
    /// layer followed by a low-index layer, both λ₀/4 thick optically.
    pub fn quarter_wave_dbr(
        incident_index: f64,
        substrate_index: f64,
        high_index: f64,
        low_index: f64,
        design_wavelength: f64,
        periods: usize,
    ) -> Result<Self> {
        let high = Layer::real(high_index, quarter_wave_thickness(high_index, design_wavelength))?;
        let low = Layer::real(low_index, quarter_wave_thickness(low_index, design_wavelength))?;
        Ok(Self::new(
            Medium::real(incident_index)?,
            Medium::real(substrate_index)?,
            vec![high, low],
            periods,
        ))
    }

    pub fn period(&self) -> &[Layer] {
        &self.period
    }

    pub fn period_len(&self) -> usize {
        self.period.len()
    }

    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Total layer count of the undefected stack.
    pub fn len(&self) -> usize {
        self.period.len() * self.periods
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Absolute index of `position` within `period` in the pristine layout.
    pub fn layer_index(&self, period: usize, position: usize) -> Result<usize> {
        if period >= self.periods || position >= self.period.len() {
            return Err(self.invalid_address(period, position));
        }
        Ok(period * self.period.len() + position)
    }

    /// Absolute insertion point for a new layer placed before `position` in
    /// `period`. `position == period_len` places it at the end of the period.
    pub fn insertion_index(&self, period: usize, position: usize) -> Result<usize> {
        if period >= self.periods || position > self.period.len() {
            return Err(self.invalid_address(period, position));
        }
        Ok(period * self.period.len() + position)
    }

    // Reported as given: an out-of-range address has no absolute index.
    fn invalid_address(&self, period: usize, position: usize) -> TmmError {
        TmmError::InvalidPeriodPosition {
            period,
            position,
            periods: self.periods,
            period_len: self.period.len(),
        }
    }

    /// The undefected periodic stack.
    pub fn build(&self) -> Stack {
        let layers = (0..self.periods)
            .flat_map(|_| self.period.iter().cloned())
            .collect();
        Stack::new(self.incident, self.exit, layers)
    }
}

/// A single pure edit of a stack, addressed by absolute layer position.
#[derive(Debug, Clone, PartialEq)]
pub enum DefectOperation {
    /// Insert `layer` before the layer at `index` (`index == len` appends).
    Insert { index: usize, layer: Layer },
    /// Remove the layer at `index`.
    Omit { index: usize },
}

impl DefectOperation {
    pub fn apply(&self, stack: &Stack) -> Result<Stack> {
        match self {
            DefectOperation::Insert { index, layer } => {
                stack.with_layer_inserted(*index, layer.clone())
            }
            DefectOperation::Omit { index } => stack.with_layer_omitted(*index),
        }
    }

    fn index(&self) -> usize {
        match self {
            DefectOperation::Insert { index, .. } | DefectOperation::Omit { index } => *index,
        }
    }

    fn is_omission(&self) -> bool {
        matches!(self, DefectOperation::Omit { .. })
    }
}

/// Apply a sequence of operations left to right.
pub fn apply_all<'a>(
    stack: &Stack,
    operations: impl IntoIterator<Item = &'a DefectOperation>,
) -> Result<Stack> {
    operations
        .into_iter()
        .try_fold(stack.clone(), |acc, op| op.apply(&acc))
}

/// Serializable description of a defect, addressed by period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DefectSpec {
    /// An extra layer inside one period.
    Insert {
        period: usize,
        position: usize,
        index: f64,
        thickness: f64,
    },
    /// One layer of one period left out.
    Omit { period: usize, position: usize },
    /// The same extra layer deposited in every period.
    InsertEveryPeriod {
        position: usize,
        index: f64,
        thickness: f64,
    },
}

/// Builder composing period-addressed defects onto a [`PeriodicDesign`].
#[derive(Debug, Clone)]
pub struct StackComposer {
    design: PeriodicDesign,
    insertions: Vec<(usize, usize, Layer)>,
    omissions: Vec<(usize, usize)>,
}

impl StackComposer {
    pub fn new(design: PeriodicDesign) -> Self {
        Self {
            design,
            insertions: Vec::new(),
            omissions: Vec::new(),
        }
    }

    pub fn design(&self) -> &PeriodicDesign {
        &self.design
    }

    /// Insert `layer` before `position` of `period` (end of period when
    /// `position == period_len`).
    pub fn insert(mut self, period: usize, position: usize, layer: Layer) -> Self {
        self.insertions.push((period, position, layer));
        self
    }

    /// Leave out the layer at `position` of `period`.
    pub fn omit(mut self, period: usize, position: usize) -> Self {
        self.omissions.push((period, position));
        self
    }

    /// Insert a copy of `layer` at `position` in every period.
    pub fn insert_in_every_period(mut self, position: usize, layer: Layer) -> Self {
        for period in 0..self.design.periods() {
            self.insertions.push((period, position, layer.clone()));
        }
        self
    }

    /// Add a defect from its serializable description.
    pub fn with_defect(self, spec: &DefectSpec) -> Result<Self> {
        Ok(match *spec {
            DefectSpec::Insert {
                period,
                position,
                index,
                thickness,
            } => self.insert(period, position, Layer::real(index, thickness)?),
            DefectSpec::Omit { period, position } => self.omit(period, position),
            DefectSpec::InsertEveryPeriod {
                position,
                index,
                thickness,
            } => self.insert_in_every_period(position, Layer::real(index, thickness)?),
        })
    }

    /// Resolve all defects to absolute operations against the pristine
    /// layout, ordered so they can be applied one after another.
    ///
    /// Operations run from the exit side towards the incident side. At a
    /// shared index the omission goes first, then insertions in reverse
    /// registration order so the inserted layers end up in registration order.
    pub fn operations(&self) -> Result<Vec<DefectOperation>> {
        let mut resolved: Vec<(usize, DefectOperation)> = Vec::new();

        let mut omitted: Vec<usize> = Vec::with_capacity(self.omissions.len());
        for &(period, position) in &self.omissions {
            let index = self.design.layer_index(period, position)?;
            if omitted.contains(&index) {
                return Err(TmmError::InvalidPosition {
                    position: index,
                    len: self.design.len(),
                });
            }
            omitted.push(index);
            resolved.push((resolved.len(), DefectOperation::Omit { index }));
        }

        for (period, position, layer) in &self.insertions {
            let index = self.design.insertion_index(*period, *position)?;
            resolved.push((
                resolved.len(),
                DefectOperation::Insert {
                    index,
                    layer: layer.clone(),
                },
            ));
        }

        resolved.sort_by(|(seq_a, a), (seq_b, b)| {
            Reverse(a.index())
                .cmp(&Reverse(b.index()))
                .then_with(|| match (a.is_omission(), b.is_omission()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Reverse(seq_a).cmp(&Reverse(seq_b)),
                })
        });

        Ok(resolved.into_iter().map(|(_, op)| op).collect())
    }

    /// Build the defected stack.
    pub fn build(&self) -> Result<Stack> {
        let operations = self.operations()?;
        let stack = apply_all(&self.design.build(), &operations)?;
        log::debug!(
            "composed stack: {} periods of {} layers, {} defect operations, {} layers total",
            self.design.periods(),
            self.design.period_len(),
            operations.len(),
            stack.len()
        );
        Ok(stack)
    }
}
