// ABOUTME: Test helper modules shared by integration tests
// ABOUTME: Currently the in-process axum request driver
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Gigs.lk

pub mod axum_test;
