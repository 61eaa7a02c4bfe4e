// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Infrastructure
//!
//! Implementations of the pod port.
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure Layer
//! - **Purpose:** Network client, credentials and the in-memory pod server

pub mod credentials;
pub mod http;
pub mod memory_pod;
