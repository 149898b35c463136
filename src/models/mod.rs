// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Core data model: hotspots, annotated images, tour state, session state.

pub mod hotspot;
pub mod image;
pub mod session;
pub mod tour;
