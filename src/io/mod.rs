// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O boundaries: image acquisition, the session store, and exports.

pub mod media;
pub mod serialization;
pub mod store;
