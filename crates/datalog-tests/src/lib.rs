//! Datalog engine scenario, simulation and property-based tests
//!
//! Everything here drives the public API of the `datalog` facade crate.
//! Set `RUST_LOG=datalog_eval=trace` to see fixpoint passes in test output.

#[cfg(test)]
mod support;


#[cfg(test)]
mod simulation;

#[cfg(test)]
mod proptest_properties;
