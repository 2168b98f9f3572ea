//! Property-based tests for the Borůvka spanning-tree engine.
//!
//! Checks the engine against a sequential Kruskal oracle, validates the
//! structural invariants of the returned tree, and confirms repeated runs
//! agree, across graph topologies with varied weight distributions.

mod oracle;
mod strategies;
mod structural;
mod types;
