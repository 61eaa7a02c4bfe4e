// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application
//!
//! Services that carry out the sharing protocol against a [`PodClient`].
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Purpose:** Access control, notifications, directory and sharing workflows
//!
//! [`PodClient`]: crate::domain::pod::PodClient

pub mod access_control;
pub mod directory;
pub mod notifications;
pub mod pod_structure;
pub mod sharing;
