// ABOUTME: Utility modules shared across collaborator clients
// ABOUTME: Currently HTTP client construction and upstream error mapping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client construction and collaborator error mapping
pub mod http_client;
