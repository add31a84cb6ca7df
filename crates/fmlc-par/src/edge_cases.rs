//! Edge case tests for fmlc-par.
