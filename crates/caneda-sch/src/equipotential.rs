//! Equipotential net consolidation.
//!
//! Wires that touch end-to-end, directly or through a chain of other
//! wires, carry the same potential and are persisted as one group. The
//! grouping is recomputed on every save and never stored in the model.

use crate::connectivity::NodeMap;
use crate::wire::{Wire, WireEnd};

/// One maximal group of endpoint-connected wires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipotential {
    /// Group id, sequential from 0 in discovery order.
    pub id: usize,
    /// Persisted id of the group's first member: the count of wires emitted
    /// by all earlier groups. Member `k` gets id `first_wire_id + k`.
    pub first_wire_id: usize,
    /// Member wire indices in traversal order, seed first.
    pub wires: Vec<usize>,
}

/// Partitions `wires` into equipotential groups.
///
/// Reachability walks shared endpoints through wire-owned ports only;
/// component ports terminate a branch without contributing a member. The
/// walk uses an explicit work stack, so chains of arbitrary length cannot
/// exhaust the call stack, and a visited bitmap keeps wire loops from
/// re-entering the traversal.
pub fn consolidate(wires: &[Wire], nodes: &NodeMap) -> Vec<Equipotential> {
    let mut visited = vec![false; wires.len()];
    let mut groups: Vec<Equipotential> = Vec::new();
    let mut next_wire_id = 0;

    for seed in 0..wires.len() {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;

        let mut members = Vec::new();
        let mut stack = vec![seed];
        while let Some(current) = stack.pop() {
            members.push(current);
            for end in WireEnd::BOTH {
                for owner in nodes.ports_at(wires[current].endpoint(end)) {
                    if let Some(neighbor) = owner.as_wire() {
                        if !visited[neighbor] {
                            visited[neighbor] = true;
                            stack.push(neighbor);
                        }
                    }
                }
            }
        }

        let first_wire_id = next_wire_id;
        next_wire_id += members.len();
        groups.push(Equipotential {
            id: groups.len(),
            first_wire_id,
            wires: members,
        });
    }

    groups
}
