//! Processing operations: transformations and consolidations.
//!
//! An [`Operation`] is a recorded processing step with one or more input
//! materials and exactly one output material, created under a single actor
//! scope. A *consolidation* is the degenerate case where the single input is
//! the output itself (packaging or relabeling without transformation); the
//! graph layer treats it specially to avoid chasing its own tail.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::id::{Address, OperationId};
use crate::material::Material;

/// A processing operation recorded by a supplier.
///
/// The registry guarantees at most one operation per output material within
/// one creator scope; more than one is a structural anomaly the resolver
/// reports rather than resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier.
    pub id: OperationId,
    /// Display name, also the node label in provenance graphs.
    pub name: String,
    /// Input materials, in recorded order. Most operations consume one or
    /// two inputs, hence the inline capacity.
    pub inputs: SmallVec<[Material; 2]>,
    /// The single output material.
    pub output: Material,
    /// The organization that recorded the operation.
    pub creator: Address,
}

impl Operation {
    /// Creates an operation from its parts.
    pub fn new(
        id: OperationId,
        name: impl Into<String>,
        inputs: impl IntoIterator<Item = Material>,
        output: Material,
        creator: Address,
    ) -> Self {
        Operation {
            id,
            name: name.into(),
            inputs: inputs.into_iter().collect(),
            output,
            creator,
        }
    }

    /// True when this operation repackages a material without transforming
    /// it: exactly one input whose id equals the output id.
    pub fn is_consolidation(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].id == self.output.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{CategoryId, MaterialId};
    use crate::material::ProductCategory;

    fn material(id: u64) -> Material {
        Material::new(
            MaterialId(id),
            ProductCategory::new(CategoryId(1), "beans", 80, ""),
        )
    }

    #[test]
    fn transformation_is_not_consolidation() {
        let op = Operation::new(
            OperationId(1),
            "roast",
            [material(1), material(2)],
            material(3),
            Address::new("0xA"),
        );
        assert!(!op.is_consolidation());
    }

    #[test]
    fn single_input_same_id_is_consolidation() {
        let op = Operation::new(
            OperationId(2),
            "repack",
            [material(5)],
            material(5),
            Address::new("0xA"),
        );
        assert!(op.is_consolidation());
    }

    #[test]
    fn single_input_different_id_is_not_consolidation() {
        let op = Operation::new(
            OperationId(3),
            "grind",
            [material(5)],
            material(6),
            Address::new("0xA"),
        );
        assert!(!op.is_consolidation());
    }
}
