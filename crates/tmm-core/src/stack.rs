use crate::error::{Result, TmmError};
use crate::layer::{Layer, Medium};
use crate::transfer_matrix::CharacteristicMatrix;
use crate::{IncidenceCondition, OpticalElement};

/// An ordered stack of layers between an incident medium and an exit
/// medium (substrate). Layer 0 faces the incident medium.
///
/// A stack is never modified in place; every edit returns a new stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Stack {
    incident: Medium,
    exit: Medium,
    layers: Vec<Layer>,
}

impl Stack {
    pub fn new(incident: Medium, exit: Medium, layers: Vec<Layer>) -> Self {
        Self {
            incident,
            exit,
            layers,
        }
    }

    /// Bare interface between two media.
    pub fn bare(incident: Medium, exit: Medium) -> Self {
        Self::new(incident, exit, Vec::new())
    }

    pub fn incident(&self) -> Medium {
        self.incident
    }

    pub fn exit(&self) -> Medium {
        self.exit
    }

    /// Layers in physical order, incident side first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// New stack with `layer` placed before the layer currently at `index`
    /// (`index == len` appends next to the exit medium).
    pub fn with_layer_inserted(&self, index: usize, layer: Layer) -> Result<Stack> {
        if index > self.layers.len() {
            return Err(TmmError::InvalidPosition {
                position: index,
                len: self.layers.len(),
            });
        }
        let mut layers = Vec::with_capacity(self.layers.len() + 1);
        layers.extend_from_slice(&self.layers[..index]);
        layers.push(layer);
        layers.extend_from_slice(&self.layers[index..]);
        Ok(Self::new(self.incident, self.exit, layers))
    }

    /// New stack without the layer at `index`.
    pub fn with_layer_omitted(&self, index: usize) -> Result<Stack> {
        if index >= self.layers.len() {
            return Err(TmmError::InvalidPosition {
                position: index,
                len: self.layers.len(),
            });
        }
        let layers = self
            .layers
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, layer)| layer.clone())
            .collect();
        Ok(Self::new(self.incident, self.exit, layers))
    }

    /// Compute the total characteristic matrix for one incidence condition,
    /// folding the layer matrices from the incident side to the exit side.
    pub fn total_matrix(&self, condition: &IncidenceCondition) -> CharacteristicMatrix {
        let n0 = self.incident.index();
        self.layers
            .iter()
            .fold(CharacteristicMatrix::identity(), |total, layer| {
                total.chain(&layer.characteristic_matrix(n0, condition))
            })
    }
}

impl<'a> IntoIterator for &'a Stack {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admittance::Polarization;
    use num_complex::Complex64;

    fn abc_stack() -> Stack {
        let layers = vec![
            Layer::real(1.1, 10.0).unwrap(),
            Layer::real(1.2, 20.0).unwrap(),
            Layer::real(1.3, 30.0).unwrap(),
        ];
        Stack::new(Medium::real(1.0).unwrap(), Medium::real(1.5).unwrap(), layers)
    }

    fn thicknesses(stack: &Stack) -> Vec<f64> {
        stack.iter().map(Layer::thickness).collect()
    }

    #[test]
    fn test_insert_preserves_order_and_original() {
        let stack = abc_stack();
        let extra = Layer::real(1.8, 5.0).unwrap();

        let front = stack.with_layer_inserted(0, extra.clone()).unwrap();
        let middle = stack.with_layer_inserted(2, extra.clone()).unwrap();
        let back = stack.with_layer_inserted(3, extra).unwrap();

        assert_eq!(thicknesses(&front), vec![5.0, 10.0, 20.0, 30.0]);
        assert_eq!(thicknesses(&middle), vec![10.0, 20.0, 5.0, 30.0]);
        assert_eq!(thicknesses(&back), vec![10.0, 20.0, 30.0, 5.0]);
        assert_eq!(thicknesses(&stack), vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_omit_preserves_order() {
        let stack = abc_stack();
        let omitted = stack.with_layer_omitted(1).unwrap();
        assert_eq!(thicknesses(&omitted), vec![10.0, 30.0]);
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn test_invalid_positions() {
        let stack = abc_stack();
        let extra = Layer::real(1.8, 5.0).unwrap();
        assert_eq!(
            stack.with_layer_inserted(4, extra),
            Err(TmmError::InvalidPosition { position: 4, len: 3 })
        );
        assert_eq!(
            stack.with_layer_omitted(3),
            Err(TmmError::InvalidPosition { position: 3, len: 3 })
        );
        let bare = Stack::bare(stack.incident(), stack.exit());
        assert!(bare.with_layer_omitted(0).is_err());
    }

    #[test]
    fn test_empty_stack_total_matrix_is_identity() {
        let stack = Stack::bare(Medium::real(1.0).unwrap(), Medium::real(1.5).unwrap());
        let cond = IncidenceCondition::new(500.0, 0.3, Polarization::TM).unwrap();
        assert_eq!(stack.total_matrix(&cond), CharacteristicMatrix::identity());
    }

    #[test]
    fn test_total_matrix_matches_manual_chain() {
        let stack = abc_stack();
        let cond = IncidenceCondition::new(480.0, 0.4, Polarization::TE).unwrap();
        let n0 = stack.incident().index();
        let manual = stack.layers()[0]
            .characteristic_matrix(n0, &cond)
            .chain(&stack.layers()[1].characteristic_matrix(n0, &cond))
            .chain(&stack.layers()[2].characteristic_matrix(n0, &cond));
        let total = stack.total_matrix(&cond);
        for (x, y) in [
            (total.a, manual.a),
            (total.b, manual.b),
            (total.c, manual.c),
            (total.d, manual.d),
        ] {
            assert!((x - y).norm() < 1e-12, "{x} != {y}");
        }
        let det = total.determinant();
        assert!((det - Complex64::new(1.0, 0.0)).norm() < 1e-12, "det = {det}");
    }
}
