// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Utility modules: coordinate mapping and identifier generation.

pub mod geometry;
pub mod ident;
