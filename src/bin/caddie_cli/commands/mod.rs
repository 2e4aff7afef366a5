// ABOUTME: Re-exports command modules for caddie-cli
// ABOUTME: One module per subcommand
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod questions;
pub mod shot;
pub mod update;
