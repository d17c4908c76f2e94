//! Workspace tooling package.
//!
//! Carries the pre-commit hook configuration (`rusty-hook`) for the fleet
//! proximity workspace. The functional crates live under `crates/`.
