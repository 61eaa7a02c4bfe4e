// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain
//!
//! Protocol types, document codecs and the storage port.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Pure types and text codecs; no network access

pub mod acl;
pub mod config;
pub mod directory;
pub mod error;
pub mod notification;
pub mod pod;
pub mod sharing;
pub mod turtle;
pub mod vocab;
