//! Cross-module tests
//!
//! Properties that span the algebra, primitives and tree.
