// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! podshare core
//!
//! Capability sharing between agents that keep their data in pods on a
//! Linked-Data document store: access grants, inbox notifications and a
//! shared agent directory.
//!
//! # Architecture
//!
//! - **Layer:** Core System
//! - **Purpose:** Library consumed by the `podshare` CLI

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::*;
